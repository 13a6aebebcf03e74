/// A raw value outside the finite set accepted by a setting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidArgument;

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("value not supported by the sensor")
    }
}

impl core::error::Error for InvalidArgument {}

/// Driver error, generic over the I2C bus error `E`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C transaction failed (bus error, NACK, arbitration loss)
    Transport(E),
    /// PART_ID did not read back as 0xC2; carries the value read
    DeviceNotFound(u8),
    /// A setting value outside its enumerated set
    InvalidArgument,
    /// Lux was requested for a sample whose green channel is zero
    ZeroGreenChannel,
}

impl<E> From<InvalidArgument> for Error<E> {
    fn from(_: InvalidArgument) -> Self {
        Error::InvalidArgument
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "I2C transport error: {:?}", e),
            Error::DeviceNotFound(id) => write!(
                f,
                "failed to find LTR-381RGB (part id {:#04x}), check your wiring",
                id
            ),
            Error::InvalidArgument => f.write_str("value not supported by the sensor"),
            Error::ZeroGreenChannel => f.write_str("green channel is zero, lux undefined"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}
