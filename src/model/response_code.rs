//! TPM 2.0 response codes returned by the trust root
//!
//! The trust root reports every outcome as a 32-bit response code. Format-one
//! codes (bit 7 set) carry the handle, session or parameter position that
//! caused the failure in bits 8..=11, so the base code has to be extracted
//! before it can be classified or described.

use std::fmt;

/// Response code of a trust-root command (`TPM_RC`)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseCode(u32);

const RC_VER1: u32 = 0x100;
const RC_FMT1: u32 = 0x080;
const RC_WARN: u32 = 0x900;
const RC_P: u32 = 0x040;
const RC_S: u32 = 0x800;

impl ResponseCode {
    pub const SUCCESS: Self = Self(0x000);

    pub const INITIALIZE: Self = Self(RC_VER1);
    pub const FAILURE: Self = Self(RC_VER1 + 0x001);
    pub const AUTH_MISSING: Self = Self(RC_VER1 + 0x025);

    pub const ATTRIBUTES: Self = Self(RC_FMT1 + 0x002);
    pub const VALUE: Self = Self(RC_FMT1 + 0x004);
    pub const KEY_SIZE: Self = Self(RC_FMT1 + 0x007);
    pub const TYPE: Self = Self(RC_FMT1 + 0x00A);
    pub const HANDLE: Self = Self(RC_FMT1 + 0x00B);
    pub const AUTH_FAIL: Self = Self(RC_FMT1 + 0x00E);
    pub const SIZE: Self = Self(RC_FMT1 + 0x015);
    pub const INSUFFICIENT: Self = Self(RC_FMT1 + 0x01A);
    pub const KEY: Self = Self(RC_FMT1 + 0x01C);
    pub const INTEGRITY: Self = Self(RC_FMT1 + 0x01F);
    pub const BAD_AUTH: Self = Self(RC_FMT1 + 0x022);
    pub const CURVE: Self = Self(RC_FMT1 + 0x026);
    pub const ECC_POINT: Self = Self(RC_FMT1 + 0x027);

    pub const OBJECT_MEMORY: Self = Self(RC_WARN + 0x002);

    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    const fn is_format_one(self) -> bool {
        self.0 & RC_FMT1 != 0
    }

    /// Code with the handle/session/parameter position stripped
    pub const fn base(self) -> Self {
        if self.is_format_one() {
            Self(self.0 & (RC_FMT1 | 0x03F))
        } else {
            Self(self.0 & (RC_WARN | 0x07F))
        }
    }

    /// Attach a handle position (1-based) to a format-one code
    pub const fn with_handle(self, position: u32) -> Self {
        Self(self.base().0 | ((position & 0x7) << 8))
    }

    /// Attach a session position (1-based) to a format-one code
    pub const fn with_session(self, position: u32) -> Self {
        Self(self.base().0 | RC_S | ((position & 0x7) << 8))
    }

    /// Attach a parameter position (1-based) to a format-one code
    pub const fn with_parameter(self, position: u32) -> Self {
        Self(self.base().0 | RC_P | ((position & 0xF) << 8))
    }

    pub fn is_auth_failure(self) -> bool {
        matches!(
            self.base(),
            Self::AUTH_FAIL | Self::BAD_AUTH | Self::AUTH_MISSING
        )
    }

    pub fn is_handle_error(self) -> bool {
        self.base() == Self::HANDLE
    }

    /// Whether the code rejects the key material itself rather than the
    /// session or the device state
    pub fn is_material_error(self) -> bool {
        matches!(
            self.base(),
            Self::ATTRIBUTES
                | Self::VALUE
                | Self::KEY_SIZE
                | Self::TYPE
                | Self::SIZE
                | Self::KEY
                | Self::CURVE
                | Self::ECC_POINT
        )
    }

    /// Human readable name and description of the base code
    pub fn as_str(self) -> &'static str {
        match self.base() {
            Self::SUCCESS => "Success",
            Self::INITIALIZE => "TPM_RC_INITIALIZE: TPM not initialized by TPM2_Startup",
            Self::FAILURE => "TPM_RC_FAILURE: Commands not being accepted because of a TPM failure",
            Self::AUTH_MISSING => "TPM_RC_AUTH_MISSING: Authorization is required for this handle",
            Self::ATTRIBUTES => "TPM_RC_ATTRIBUTES: Inconsistent attributes",
            Self::VALUE => "TPM_RC_VALUE: Value is out of range or is not correct for the context",
            Self::KEY_SIZE => "TPM_RC_KEY_SIZE: Key size is not supported",
            Self::TYPE => "TPM_RC_TYPE: The type of the value is not appropriate for the use",
            Self::HANDLE => "TPM_RC_HANDLE: The handle is not correct for the use",
            Self::AUTH_FAIL => {
                "TPM_RC_AUTH_FAIL: The authorization HMAC check failed and DA counter incremented"
            }
            Self::SIZE => "TPM_RC_SIZE: Structure is the wrong size",
            Self::INSUFFICIENT => {
                "TPM_RC_INSUFFICIENT: The TPM was unable to unmarshal a value because there were not enough octets in the input buffer"
            }
            Self::KEY => "TPM_RC_KEY: Key fields are not compatible with the selected use",
            Self::INTEGRITY => "TPM_RC_INTEGRITY: Integrity check failed",
            Self::BAD_AUTH => "TPM_RC_BAD_AUTH: Authorization failure without DA implications",
            Self::CURVE => "TPM_RC_CURVE: Curve not supported",
            Self::ECC_POINT => "TPM_RC_ECC_POINT: Point is not on the required curve",
            Self::OBJECT_MEMORY => "TPM_RC_OBJECT_MEMORY: Out of memory for object contexts",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}: {}", self.0, self.as_str())
    }
}

impl fmt::Debug for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResponseCode(0x{:x})", self.0)
    }
}

impl From<ResponseCode> for u32 {
    fn from(rc: ResponseCode) -> Self {
        rc.0
    }
}
