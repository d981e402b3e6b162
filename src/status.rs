use std::fmt;

use crate::CryptorError;

/// The outcome of a cryptographic operation.
///
/// The numeric codes match the status codes reported by the native cryptography library
/// used by the AWS mobile SDKs, so that statuses can be passed across that boundary
/// unchanged.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Status {
    /// The operation completed successfully.
    Success,

    /// An illegal parameter value was supplied.
    ParamError,

    /// The output buffer supplied was too small for the result.
    BufferTooSmall,

    /// Memory allocation failed.
    MemoryFailure,

    /// The input was not aligned to the block size of the algorithm (and padding was
    /// not requested).
    AlignmentError,

    /// The input could not be decoded, for example the padding was malformed.
    DecodeError,

    /// The operation is not implemented for the algorithm.
    Unimplemented,

    /// An internal counter overflowed.
    Overflow,

    /// The random number generator failed.
    RngFailure,
}

impl Status {
    /// The native numeric code for this status.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::ParamError => -4300,
            Status::BufferTooSmall => -4301,
            Status::MemoryFailure => -4302,
            Status::AlignmentError => -4303,
            Status::DecodeError => -4304,
            Status::Unimplemented => -4305,
            Status::Overflow => -4306,
            Status::RngFailure => -4307,
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::ParamError => "Parameter error",
            Status::BufferTooSmall => "Buffer too small",
            Status::MemoryFailure => "Memory failure",
            Status::AlignmentError => "Alignment error",
            Status::DecodeError => "Decode error",
            Status::Unimplemented => "Unimplemented",
            Status::Overflow => "Overflow",
            Status::RngFailure => "RNG failure",
        }
    }
}

impl TryFrom<i32> for Status {
    type Error = CryptorError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Status::Success,
            -4300 => Status::ParamError,
            -4301 => Status::BufferTooSmall,
            -4302 => Status::MemoryFailure,
            -4303 => Status::AlignmentError,
            -4304 => Status::DecodeError,
            -4305 => Status::Unimplemented,
            -4306 => Status::Overflow,
            -4307 => Status::RngFailure,
            other => return Err(CryptorError::UnexpectedStatus(other)),
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}
