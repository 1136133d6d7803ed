//! Trigger output pin.

use embedded_hal::digital::{OutputPin, PinState};

/// Single digital line carrying the emulated sensor signal.
///
/// Contract: both calls complete in bounded time, never block and are safe
/// to call from the timer ISR. A level that is already driven is re-driven
/// without a glitch.
pub trait TriggerOutput {
    fn set_high(&mut self);
    fn set_low(&mut self);

    #[inline]
    fn drive(&mut self, level: bool) {
        if level {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

// Every embedded-hal output works as a trigger line. GPIO writes on the
// target cannot fail, so the error is dropped rather than carried into the ISR.
impl<P: OutputPin> TriggerOutput for P {
    #[inline]
    fn set_high(&mut self) {
        let _ = self.set_state(PinState::High);
    }

    #[inline]
    fn set_low(&mut self) {
        let _ = self.set_state(PinState::Low);
    }
}

/// Configure the trigger GPIO as a push-pull output, driven low.
#[cfg(target_os = "espidf")]
pub fn init_trigger_pin<'d, T>(
    pin: impl esp_idf_svc::hal::peripheral::Peripheral<P = T> + 'd,
) -> Result<
    esp_idf_svc::hal::gpio::PinDriver<'d, T, esp_idf_svc::hal::gpio::Output>,
    esp_idf_svc::sys::EspError,
>
where
    T: esp_idf_svc::hal::gpio::OutputPin,
{
    let mut driver = esp_idf_svc::hal::gpio::PinDriver::output(pin)?;
    driver.set_low()?;
    Ok(driver)
}
