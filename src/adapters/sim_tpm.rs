//! In-process trust root
//!
//! [`SimulatedTpm`] behaves like a TPM for the commands this tool needs. It
//! holds RSA storage keys at persistent handles, wraps imported material
//! under the parent's seed and keeps up to three transient objects loaded.
//!
//! The wrap is a SHA-256 keystream over the marshaled sensitive area plus an
//! integrity digest over the ciphertext and the object name. Blobs produced
//! for one parent therefore only load under that parent, and any change to
//! either area is detected on load.

use std::collections::{BTreeMap, HashMap};

use p256::elliptic_curve::sec1::FromEncodedPoint;
use p256::{EncodedPoint, FieldBytes, PublicKey, SecretKey};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::domain::{NullAuthorization, ParentAuthorization, ResolvedParent};
use crate::logic::marshal::{Marshaler, Unmarshaler};
use crate::model::{
    AuthSecret, EccCurve, EccKeyMaterial, Handle, KeyMaterial, LoadedKey, PrivateArea,
    ProtectedKey, PublicArea, PublicDescription, ResponseCode, RsaKeyMaterial,
};
use crate::ports::{
    DeviceConnector, DeviceResult, HandleUnloader, KeyImporter, KeyLoader, PublicReader,
    SessionCloser,
};

/// Transient object slots, as on most hardware TPMs
const MAX_TRANSIENT_OBJECTS: usize = 3;

const STORAGE_MODULUS_LEN: usize = 256;
const INTEGRITY_LEN: usize = 32;

/// Opens sessions on a freshly provisioned [`SimulatedTpm`]
///
/// Storage keys are derived from their handle, so every session (and every
/// process) sees the same parents. A blob written by one run loads in the
/// next.
#[derive(Debug, Clone)]
pub struct SimulatedConnector {
    storage_keys: Vec<(Handle, AuthSecret)>,
}

impl SimulatedConnector {
    /// A trust root without any storage key
    pub fn new() -> Self {
        Self {
            storage_keys: Vec::new(),
        }
    }

    /// A trust root provisioned with the demo storage key
    pub fn demo() -> Self {
        Self::new().with_storage_key(Handle::DEMO_STORAGE_KEY, AuthSecret::demo_storage_key())
    }

    pub fn with_storage_key(mut self, handle: Handle, auth: AuthSecret) -> Self {
        self.storage_keys.retain(|(existing, _)| *existing != handle);
        self.storage_keys.push((handle, auth));
        self
    }
}

impl Default for SimulatedConnector {
    fn default() -> Self {
        Self::demo()
    }
}

impl DeviceConnector for SimulatedConnector {
    type Device = SimulatedTpm;

    fn open(&self) -> DeviceResult<SimulatedTpm> {
        let mut persistent = HashMap::new();
        for (handle, auth) in &self.storage_keys {
            persistent.insert(*handle, StorageKey::provision(*handle, auth.clone())?);
        }
        debug!(
            "Simulated trust root started with {} storage key(s)",
            persistent.len()
        );

        Ok(SimulatedTpm {
            persistent,
            transient: BTreeMap::new(),
            next_transient: Handle::TRANSIENT_FIRST,
            open: true,
        })
    }
}

struct StorageKey {
    public: PublicArea,
    auth: AuthSecret,
    seed: [u8; 32],
}

impl StorageKey {
    fn provision(handle: Handle, auth: AuthSecret) -> DeviceResult<Self> {
        let mut modulus = Vec::with_capacity(STORAGE_MODULUS_LEN);
        let mut counter = 0u32;
        while modulus.len() < STORAGE_MODULUS_LEN {
            modulus.extend_from_slice(
                &Sha256::new()
                    .chain_update(b"storage modulus")
                    .chain_update(handle.value().to_be_bytes())
                    .chain_update(counter.to_be_bytes())
                    .finalize(),
            );
            counter += 1;
        }
        modulus.truncate(STORAGE_MODULUS_LEN);
        modulus[0] |= 0x80;

        let public = PublicArea::from_description(&PublicDescription::storage_key(modulus))
            .map_err(|_| ResponseCode::FAILURE)?;
        let seed: [u8; 32] = Sha256::new()
            .chain_update(b"storage seed")
            .chain_update(handle.value().to_be_bytes())
            .finalize()
            .into();

        Ok(Self { public, auth, seed })
    }
}

/// An open session on the simulated trust root
pub struct SimulatedTpm {
    persistent: HashMap<Handle, StorageKey>,
    transient: BTreeMap<Handle, PublicArea>,
    next_transient: u32,
    open: bool,
}

impl SimulatedTpm {
    /// Number of loaded transient objects
    pub fn transient_count(&self) -> usize {
        self.transient.len()
    }

    fn ensure_open(&self) -> DeviceResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(ResponseCode::INITIALIZE)
        }
    }

    fn authorize(
        &self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
    ) -> DeviceResult<&StorageKey> {
        let key = self
            .persistent
            .get(&parent.handle())
            .ok_or(ResponseCode::HANDLE.with_handle(1))?;

        if parent.name() != key.public.name().as_slice() {
            return Err(ResponseCode::HANDLE.with_handle(1));
        }
        if !auth.authorizes(parent.handle()) || auth.secret() != &key.auth {
            debug!("Rejected authorization for {}", parent.handle());
            return Err(ResponseCode::AUTH_FAIL.with_session(1));
        }
        Ok(key)
    }

    fn allocate(&mut self, public: PublicArea) -> DeviceResult<Handle> {
        if self.transient.len() >= MAX_TRANSIENT_OBJECTS {
            return Err(ResponseCode::OBJECT_MEMORY);
        }
        let handle = Handle::new(self.next_transient);
        self.next_transient += 1;
        self.transient.insert(handle, public);
        trace!("Loaded transient object {handle}");
        Ok(handle)
    }
}

impl PublicReader for SimulatedTpm {
    fn read_public(
        &mut self,
        handle: Handle,
        _auth: &NullAuthorization,
    ) -> DeviceResult<PublicArea> {
        self.ensure_open()?;
        if let Some(key) = self.persistent.get(&handle) {
            return Ok(key.public.clone());
        }
        self.transient
            .get(&handle)
            .cloned()
            .ok_or(ResponseCode::HANDLE.with_handle(1))
    }
}

impl KeyImporter for SimulatedTpm {
    fn import_private_key(
        &mut self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
        material: &KeyMaterial,
    ) -> DeviceResult<LoadedKey> {
        self.ensure_open()?;
        let seed = self.authorize(parent, auth)?.seed;

        match material {
            KeyMaterial::Rsa(rsa) => check_rsa(rsa)?,
            KeyMaterial::Ecc(ecc) => check_ecc(ecc)?,
        }

        let public = PublicArea::from_description(&PublicDescription::for_import(material))
            .map_err(|_| ResponseCode::SIZE.with_parameter(2))?;
        let sensitive = marshal_sensitive(material)?;
        let private = PrivateArea::from_bytes(wrap(&seed, &public.name(), &sensitive)?)
            .map_err(|_| ResponseCode::SIZE.with_parameter(1))?;

        let handle = self.allocate(public.clone())?;
        Ok(LoadedKey {
            handle,
            key: ProtectedKey::new(public, private),
        })
    }
}

impl KeyLoader for SimulatedTpm {
    fn load_key(
        &mut self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
        key: &ProtectedKey,
    ) -> DeviceResult<Handle> {
        self.ensure_open()?;
        let seed = self.authorize(parent, auth)?.seed;

        let description = key
            .public
            .describe()
            .map_err(|_| ResponseCode::VALUE.with_parameter(2))?;
        let sensitive = unwrap(&seed, &key.public.name(), key.private.as_bytes())?;

        let mut u = Unmarshaler::new(&sensitive);
        let sensitive_type = u.get_u16().map_err(|_| ResponseCode::INTEGRITY.with_parameter(1))?;
        if sensitive_type != description.algorithm().alg_id() {
            return Err(ResponseCode::KEY.with_parameter(1));
        }

        self.allocate(key.public.clone())
    }
}

impl HandleUnloader for SimulatedTpm {
    fn unload(&mut self, handle: Handle) -> DeviceResult<()> {
        self.ensure_open()?;
        self.transient
            .remove(&handle)
            .map(|_| trace!("Flushed transient object {handle}"))
            .ok_or(ResponseCode::HANDLE.with_handle(1))
    }
}

impl SessionCloser for SimulatedTpm {
    fn cleanup(&mut self) -> DeviceResult<()> {
        self.ensure_open()?;
        self.transient.clear();
        self.open = false;
        Ok(())
    }
}

fn check_rsa(rsa: &RsaKeyMaterial) -> DeviceResult<()> {
    if !RsaKeyMaterial::SUPPORTED_KEY_BITS.contains(&rsa.key_bits()) {
        return Err(ResponseCode::KEY_SIZE.with_parameter(2));
    }
    if rsa.prime().len() * 2 != rsa.modulus().len() {
        return Err(ResponseCode::SIZE.with_parameter(3));
    }
    let exponent = rsa.exponent();
    if exponent != 0 && (exponent < 3 || exponent % 2 == 0) {
        return Err(ResponseCode::VALUE.with_parameter(2));
    }
    Ok(())
}

fn check_ecc(ecc: &EccKeyMaterial) -> DeviceResult<()> {
    if ecc.curve() != EccCurve::NistP256 {
        return Err(ResponseCode::CURVE.with_parameter(2));
    }
    let size = ecc.curve().coordinate_size();
    if ecc.x().len() != size || ecc.y().len() != size || ecc.d().len() != size {
        return Err(ResponseCode::SIZE.with_parameter(2));
    }

    let point = EncodedPoint::from_affine_coordinates(
        FieldBytes::from_slice(ecc.x()),
        FieldBytes::from_slice(ecc.y()),
        false,
    );
    let public = Option::<PublicKey>::from(PublicKey::from_encoded_point(&point))
        .ok_or(ResponseCode::ECC_POINT.with_parameter(2))?;
    let secret = SecretKey::from_slice(ecc.d()).map_err(|_| ResponseCode::KEY.with_parameter(3))?;

    if secret.public_key() != public {
        return Err(ResponseCode::KEY.with_parameter(3));
    }
    Ok(())
}

/// `TPMT_SENSITIVE` with empty auth and seed values
fn marshal_sensitive(material: &KeyMaterial) -> DeviceResult<Zeroizing<Vec<u8>>> {
    let mut m = Marshaler::new();
    m.put_u16(material.algorithm().alg_id());
    m.put_sized(&[])
        .and_then(|m| m.put_sized(&[]))
        .and_then(|m| m.put_sized(material.private_component()))
        .map_err(|_| ResponseCode::SIZE.with_parameter(3))?;
    Ok(Zeroizing::new(m.finish()))
}

fn wrap(seed: &[u8; 32], name: &[u8], sensitive: &[u8]) -> DeviceResult<Vec<u8>> {
    let mut encrypted = sensitive.to_vec();
    apply_keystream(seed, name, &mut encrypted);

    let mut m = Marshaler::new();
    m.put_sized(&integrity(seed, &encrypted, name))
        .map_err(|_| ResponseCode::SIZE)?
        .put_bytes(&encrypted);
    Ok(m.finish())
}

fn unwrap(seed: &[u8; 32], name: &[u8], private: &[u8]) -> DeviceResult<Zeroizing<Vec<u8>>> {
    let mut u = Unmarshaler::new(private);
    let digest = u
        .get_sized()
        .map_err(|_| ResponseCode::INSUFFICIENT.with_parameter(1))?;
    let encrypted = u
        .take(u.remaining())
        .map_err(|_| ResponseCode::INSUFFICIENT.with_parameter(1))?;

    if digest.len() != INTEGRITY_LEN || digest != integrity(seed, encrypted, name).as_slice() {
        return Err(ResponseCode::INTEGRITY.with_parameter(1));
    }

    let mut sensitive = Zeroizing::new(encrypted.to_vec());
    apply_keystream(seed, name, &mut sensitive);
    Ok(sensitive)
}

fn apply_keystream(seed: &[u8; 32], name: &[u8], data: &mut [u8]) {
    for (counter, chunk) in data.chunks_mut(32).enumerate() {
        let block = Sha256::new()
            .chain_update(b"STORAGE")
            .chain_update(seed)
            .chain_update(name)
            .chain_update((counter as u32).to_be_bytes())
            .finalize();
        for (byte, key) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= key;
        }
    }
}

fn integrity(seed: &[u8; 32], encrypted: &[u8], name: &[u8]) -> [u8; INTEGRITY_LEN] {
    Sha256::new()
        .chain_update(b"INTEGRITY")
        .chain_update(seed)
        .chain_update(encrypted)
        .chain_update(name)
        .finalize()
        .into()
}
