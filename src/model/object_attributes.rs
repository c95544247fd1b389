use std::fmt;

/// Object attribute bits of a public area (`TPMA_OBJECT`)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectAttributes(u32);

impl ObjectAttributes {
    pub const FIXED_TPM: u32 = 0x0000_0002;
    pub const FIXED_PARENT: u32 = 0x0000_0010;
    pub const SENSITIVE_DATA_ORIGIN: u32 = 0x0000_0020;
    pub const USER_WITH_AUTH: u32 = 0x0000_0040;
    pub const NO_DA: u32 = 0x0000_0400;
    pub const RESTRICTED: u32 = 0x0001_0000;
    pub const DECRYPT: u32 = 0x0002_0000;
    pub const SIGN: u32 = 0x0004_0000;

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, bits: u32) -> bool {
        self.0 & bits == bits
    }

    /// Attributes given to imported keys: usable for signing and decryption
    /// with the key's own auth value. Imported keys cannot be `fixedTPM`.
    pub const fn imported() -> Self {
        Self(Self::USER_WITH_AUTH | Self::NO_DA | Self::DECRYPT | Self::SIGN)
    }

    /// Attributes of a storage (parent) key
    pub const fn storage_key() -> Self {
        Self(
            Self::FIXED_TPM
                | Self::FIXED_PARENT
                | Self::SENSITIVE_DATA_ORIGIN
                | Self::USER_WITH_AUTH
                | Self::NO_DA
                | Self::RESTRICTED
                | Self::DECRYPT,
        )
    }

    /// A key can act as parent when it is a restricted decryption key
    pub const fn is_storage_parent(self) -> bool {
        self.contains(Self::RESTRICTED | Self::DECRYPT) && !self.contains(Self::SIGN)
    }
}

impl fmt::Debug for ObjectAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectAttributes(0x{:08x})", self.0)
    }
}
