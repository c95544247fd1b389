//! Built-in test key material
//!
//! A 2048-bit RSA key (modulus, public exponent and the prime `q`) and a
//! NIST P-256 key (public point and private scalar). The command line tool
//! imports these, so a run needs no external key files.

use crate::model::{
    Algorithm, EccCurve, EccKeyMaterial, KeyMaterial, KeyMaterialError, RsaKeyMaterial,
};

pub const RSA_EXPONENT: u32 = 0x0001_0001;

#[rustfmt::skip]
pub const RSA_MODULUS: [u8; 256] = [
    0xc1, 0xbd, 0x51, 0x02, 0x7d, 0x06, 0xff, 0xf7, 0x27, 0xf2, 0x83, 0xbc,
    0xbe, 0x15, 0x34, 0x28, 0x65, 0xc2, 0x3c, 0xbf, 0xa3, 0xbe, 0x8f, 0xc5,
    0x6c, 0xed, 0x1f, 0x50, 0xf4, 0x56, 0xe7, 0x1b, 0x59, 0x96, 0x6e, 0x99,
    0x9a, 0x10, 0x2e, 0x7b, 0xbb, 0x45, 0x8a, 0xcb, 0x99, 0xe2, 0xa6, 0x3f,
    0xc5, 0x6a, 0x90, 0xe9, 0x03, 0x35, 0xc6, 0x59, 0x52, 0xd7, 0x0b, 0x2c,
    0x53, 0x4c, 0x6c, 0x80, 0xcd, 0x9b, 0x36, 0xaa, 0x9d, 0xf0, 0xce, 0xc2,
    0x55, 0x53, 0x09, 0xb6, 0x08, 0x0c, 0x32, 0x4a, 0xfe, 0x10, 0x26, 0xb6,
    0x01, 0x77, 0xf8, 0x33, 0x59, 0xfa, 0x75, 0xf3, 0x75, 0x0b, 0xde, 0x4b,
    0x0f, 0x6e, 0xcb, 0x45, 0xad, 0x9d, 0xb6, 0xdd, 0x19, 0x3f, 0xd5, 0xaf,
    0xb8, 0x3c, 0x80, 0xf3, 0xce, 0x73, 0x00, 0x73, 0x4d, 0x32, 0x72, 0x46,
    0x42, 0x30, 0xfa, 0x11, 0x39, 0xc0, 0x6f, 0xa2, 0x16, 0xd8, 0x1f, 0xa3,
    0x6d, 0xb0, 0x7c, 0xd5, 0x8a, 0x78, 0xfe, 0xdb, 0x0c, 0xcb, 0xcb, 0xa6,
    0xce, 0x10, 0x60, 0xeb, 0x6e, 0xc0, 0xf1, 0xcf, 0x98, 0xef, 0xf6, 0x6d,
    0x10, 0xce, 0xb5, 0x8c, 0xd1, 0x3b, 0xab, 0x6e, 0x1b, 0x22, 0x8d, 0x41,
    0x36, 0x16, 0x8d, 0x94, 0x85, 0x16, 0x8e, 0x08, 0x35, 0x07, 0x83, 0x58,
    0x85, 0x75, 0x52, 0x19, 0x7b, 0x29, 0x95, 0x34, 0x46, 0x16, 0x13, 0xd7,
    0xd2, 0x1d, 0x2a, 0xef, 0x8c, 0x50, 0x4f, 0x0c, 0x33, 0xe4, 0xa3, 0x9c,
    0xfc, 0xfa, 0xdc, 0xdc, 0x0e, 0x7c, 0xbd, 0x79, 0x25, 0x2f, 0x44, 0x21,
    0x71, 0x06, 0x81, 0x3f, 0x48, 0x4e, 0x38, 0x42, 0xc0, 0x6b, 0x89, 0x37,
    0x6f, 0xcc, 0xfd, 0xb3, 0x74, 0xfc, 0xe9, 0xc0, 0xe2, 0x5d, 0x70, 0x9f,
    0x3f, 0x37, 0x05, 0x51, 0x0d, 0x46, 0x88, 0xd4, 0x5e, 0x0a, 0xe8, 0xa5,
    0x80, 0x37, 0x99, 0x97,
];

#[rustfmt::skip]
pub const RSA_PRIME_Q: [u8; 128] = [
    0xc6, 0x2f, 0x6f, 0x1f, 0xe5, 0x80, 0xcc, 0x56, 0x93, 0xba, 0x3a, 0xd1,
    0xef, 0x76, 0x5a, 0x75, 0xc9, 0xd1, 0xd7, 0xd2, 0x34, 0x24, 0x74, 0xcc,
    0x32, 0x1a, 0x11, 0x1a, 0x19, 0x27, 0xec, 0x4a, 0x2c, 0xe9, 0x5a, 0x68,
    0xfa, 0xd1, 0xe6, 0x73, 0x69, 0xf2, 0x59, 0xea, 0x74, 0x5d, 0xd9, 0xc1,
    0x88, 0xdf, 0xb9, 0xf2, 0x9a, 0x04, 0x2a, 0xca, 0x39, 0xec, 0x16, 0x6a,
    0x5a, 0xd8, 0xc0, 0xed, 0xf1, 0xc5, 0x9c, 0xd3, 0x5c, 0x9c, 0xcc, 0xe3,
    0x11, 0x0a, 0x80, 0x6a, 0x54, 0x98, 0x66, 0x6d, 0x49, 0xf3, 0xe3, 0x25,
    0x49, 0x16, 0x2a, 0x14, 0x80, 0x37, 0xc2, 0x6a, 0x3b, 0x46, 0x40, 0xe0,
    0x76, 0xdb, 0xc6, 0xd5, 0x17, 0x4d, 0x6a, 0x37, 0x1f, 0xf8, 0x87, 0x93,
    0xc6, 0x5d, 0x2e, 0xbd, 0xfe, 0x65, 0x19, 0x3c, 0x23, 0xe5, 0x65, 0xad,
    0xbb, 0x9c, 0xa9, 0xc6, 0x2d, 0x33, 0x1a, 0x4b,
];

#[rustfmt::skip]
pub const ECC_P256_X: [u8; 32] = [
    0x3a, 0x7a, 0x7a, 0xd3, 0x83, 0x66, 0x34, 0x66, 0x04, 0x56, 0xa5, 0x8e,
    0x0a, 0x5a, 0xa6, 0x09, 0x56, 0xe6, 0x35, 0x51, 0xd7, 0x81, 0x11, 0x1d,
    0x4f, 0x93, 0x14, 0xc3, 0x05, 0xe9, 0xff, 0xd8,
];

#[rustfmt::skip]
pub const ECC_P256_Y: [u8; 32] = [
    0xac, 0x0c, 0x2f, 0x3b, 0xfb, 0xc1, 0xc5, 0x74, 0xa5, 0xe1, 0x15, 0x85,
    0x94, 0x6d, 0x8f, 0x18, 0x6f, 0xfc, 0x62, 0xcc, 0x32, 0x1c, 0xc3, 0x03,
    0x37, 0xcf, 0xe0, 0x6d, 0x34, 0x07, 0xcd, 0x84,
];

#[rustfmt::skip]
pub const ECC_P256_D: [u8; 32] = [
    0xd7, 0x56, 0x23, 0x3f, 0x0e, 0x8f, 0xac, 0x01, 0xc1, 0x7e, 0x82, 0x1d,
    0x31, 0x9c, 0x63, 0x88, 0x1e, 0x38, 0xc2, 0x48, 0xab, 0x3b, 0x14, 0x95,
    0x95, 0xde, 0xe7, 0x68, 0x79, 0x62, 0xfa, 0x0c,
];

pub fn rsa_material() -> Result<KeyMaterial, KeyMaterialError> {
    RsaKeyMaterial::new(&RSA_MODULUS, RSA_EXPONENT, &RSA_PRIME_Q).map(KeyMaterial::from)
}

pub fn ecc_material() -> Result<KeyMaterial, KeyMaterialError> {
    EccKeyMaterial::new(EccCurve::NistP256, &ECC_P256_X, &ECC_P256_Y, &ECC_P256_D)
        .map(KeyMaterial::from)
}

/// Demo material for the selected algorithm
pub fn material(algorithm: Algorithm) -> Result<KeyMaterial, KeyMaterialError> {
    match algorithm {
        Algorithm::Rsa => rsa_material(),
        Algorithm::Ecc => ecc_material(),
    }
}
