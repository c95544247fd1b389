use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::domain::{NullAuthorization, ParentAuthorization, ResolvedParent};
use crate::error::{KeyImportError, KeyImportResult};
use crate::logic::encode;
use crate::model::{
    AuthSecret, Handle, KeyMaterial, LoadedKey, ObjectAttributes, PrivateArea, ProtectedKey,
    PublicArea, PublicDescription, ResponseCode,
};
use crate::ports::{
    BlobSink, DeviceConnector, DeviceResult, HandleUnloader, KeyImporter, KeyLoader,
    PublicReader, SessionCloser,
};

/// What happened to sessions and transient handles, shared by a connector
/// and every device it opened
#[derive(Debug, Default)]
pub struct Journal {
    pub sessions_opened: usize,
    pub sessions_closed: usize,
    pub loaded: Vec<Handle>,
    pub unloaded: Vec<Handle>,
}

impl Journal {
    pub fn outstanding(&self) -> Vec<Handle> {
        self.loaded
            .iter()
            .filter(|handle| !self.unloaded.contains(handle))
            .copied()
            .collect()
    }

    /// Every session closed and every handle unloaded
    pub fn is_balanced(&self) -> bool {
        self.sessions_opened == self.sessions_closed && self.outstanding().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Init,
    Resolve,
    Wrap,
    Load,
}

#[derive(Debug, Clone)]
pub struct FakeConnector {
    journal: Rc<RefCell<Journal>>,
    parent_public: PublicArea,
    secret: AuthSecret,
    failure: Option<(FailAt, ResponseCode)>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self {
            journal: Rc::default(),
            parent_public: storage_public(ObjectAttributes::storage_key()),
            secret: AuthSecret::demo_storage_key(),
            failure: None,
        }
    }

    pub fn failing_at(mut self, at: FailAt, rc: ResponseCode) -> Self {
        self.failure = Some((at, rc));
        self
    }

    /// Put a signing key at the demo parent handle instead of a storage key
    pub fn with_signing_parent(mut self) -> Self {
        self.parent_public = storage_public(ObjectAttributes::from_bits(
            ObjectAttributes::USER_WITH_AUTH | ObjectAttributes::SIGN,
        ));
        self
    }

    pub fn journal(&self) -> Rc<RefCell<Journal>> {
        Rc::clone(&self.journal)
    }
}

impl DeviceConnector for FakeConnector {
    type Device = FakeTpm;

    fn open(&self) -> DeviceResult<FakeTpm> {
        if let Some((FailAt::Init, rc)) = self.failure {
            return Err(rc);
        }
        self.journal.borrow_mut().sessions_opened += 1;

        Ok(FakeTpm {
            journal: Rc::clone(&self.journal),
            parent_public: self.parent_public.clone(),
            secret: self.secret.clone(),
            failure: self.failure,
            loaded: Vec::new(),
            next_handle: Handle::TRANSIENT_FIRST,
        })
    }
}

pub struct FakeTpm {
    journal: Rc<RefCell<Journal>>,
    parent_public: PublicArea,
    secret: AuthSecret,
    failure: Option<(FailAt, ResponseCode)>,
    loaded: Vec<Handle>,
    next_handle: u32,
}

impl FakeTpm {
    pub fn new() -> Self {
        let connector = FakeConnector::new();
        connector.journal.borrow_mut().sessions_opened += 1;
        Self {
            journal: connector.journal(),
            parent_public: connector.parent_public,
            secret: connector.secret,
            failure: None,
            loaded: Vec::new(),
            next_handle: Handle::TRANSIENT_FIRST,
        }
    }

    fn fail_at(&self, at: FailAt) -> DeviceResult<()> {
        match self.failure {
            Some((point, rc)) if point == at => Err(rc),
            _ => Ok(()),
        }
    }

    fn check_auth(&self, parent: &ResolvedParent, auth: &ParentAuthorization) -> DeviceResult<()> {
        if parent.handle() != Handle::DEMO_STORAGE_KEY {
            return Err(ResponseCode::HANDLE.with_handle(1));
        }
        if !auth.authorizes(parent.handle()) || auth.secret() != &self.secret {
            return Err(ResponseCode::AUTH_FAIL.with_session(1));
        }
        Ok(())
    }

    fn allocate(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;
        self.loaded.push(handle);
        self.journal.borrow_mut().loaded.push(handle);
        handle
    }
}

impl PublicReader for FakeTpm {
    fn read_public(
        &mut self,
        handle: Handle,
        _auth: &NullAuthorization,
    ) -> DeviceResult<PublicArea> {
        self.fail_at(FailAt::Resolve)?;
        if handle == Handle::DEMO_STORAGE_KEY {
            Ok(self.parent_public.clone())
        } else {
            Err(ResponseCode::HANDLE.with_handle(1))
        }
    }
}

impl KeyImporter for FakeTpm {
    fn import_private_key(
        &mut self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
        material: &KeyMaterial,
    ) -> DeviceResult<LoadedKey> {
        self.fail_at(FailAt::Wrap)?;
        self.check_auth(parent, auth)?;

        let public = PublicArea::from_description(&PublicDescription::for_import(material))
            .map_err(|_| ResponseCode::SIZE)?;
        let scrambled = material
            .private_component()
            .iter()
            .map(|byte| byte ^ 0x5a)
            .collect();
        let private = PrivateArea::from_bytes(scrambled).map_err(|_| ResponseCode::SIZE)?;

        Ok(LoadedKey {
            handle: self.allocate(),
            key: ProtectedKey::new(public, private),
        })
    }
}

impl KeyLoader for FakeTpm {
    fn load_key(
        &mut self,
        parent: &ResolvedParent,
        auth: &ParentAuthorization,
        _key: &ProtectedKey,
    ) -> DeviceResult<Handle> {
        self.fail_at(FailAt::Load)?;
        self.check_auth(parent, auth)?;
        Ok(self.allocate())
    }
}

impl HandleUnloader for FakeTpm {
    fn unload(&mut self, handle: Handle) -> DeviceResult<()> {
        let position = self
            .loaded
            .iter()
            .position(|loaded| *loaded == handle)
            .ok_or(ResponseCode::HANDLE.with_handle(1))?;
        self.loaded.remove(position);
        self.journal.borrow_mut().unloaded.push(handle);
        Ok(())
    }
}

impl SessionCloser for FakeTpm {
    fn cleanup(&mut self) -> DeviceResult<()> {
        self.journal.borrow_mut().sessions_closed += 1;
        Ok(())
    }
}

fn storage_public(attributes: ObjectAttributes) -> PublicArea {
    let mut description = PublicDescription::storage_key(vec![0xc5; 256]);
    description.attributes = attributes;
    PublicArea::from_description(&description).unwrap()
}

/// Keeps every encoded blob in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub blobs: Vec<Vec<u8>>,
}

impl BlobSink for MemorySink {
    fn persist(&mut self, key: &ProtectedKey) -> KeyImportResult<usize> {
        let blob = encode(key);
        let written = blob.len();
        self.blobs.push(blob);
        Ok(written)
    }

    fn destination(&self) -> String {
        "memory".to_string()
    }
}

/// Refuses every write with `EACCES`
#[derive(Debug, Default)]
pub struct FailingSink;

impl BlobSink for FailingSink {
    fn persist(&mut self, _key: &ProtectedKey) -> KeyImportResult<usize> {
        Err(KeyImportError::persistence(
            self.destination(),
            io::Error::from_raw_os_error(13),
        ))
    }

    fn destination(&self) -> String {
        "read-only".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests_for;
    use crate::ports::contract_tests::trust_root_contract;

    contract_tests_for!(
        fake_tpm_contract,
        make = FakeTpm::new,
        tests = {
            test_read_public_of_storage_parent => trust_root_contract::test_read_public_of_storage_parent,
            test_read_public_unknown_handle => trust_root_contract::test_read_public_unknown_handle,
            test_import_rsa_success => trust_root_contract::test_import_rsa_success,
            test_import_ecc_success => trust_root_contract::test_import_ecc_success,
            test_import_wrong_secret => trust_root_contract::test_import_wrong_secret,
            test_import_auth_bound_to_other_parent => trust_root_contract::test_import_auth_bound_to_other_parent,
            test_load_round_trip => trust_root_contract::test_load_round_trip,
            test_unload_unknown_handle => trust_root_contract::test_unload_unknown_handle,
            test_unload_twice => trust_root_contract::test_unload_twice,
            test_cleanup => trust_root_contract::test_cleanup,
        }
    );

    #[test]
    fn test_journal_tracks_outstanding_handles() {
        let mut journal = Journal::default();
        journal.sessions_opened = 1;
        journal.loaded = vec![Handle::new(0x8000_0000), Handle::new(0x8000_0001)];
        journal.unloaded = vec![Handle::new(0x8000_0000)];

        assert_eq!(journal.outstanding(), vec![Handle::new(0x8000_0001)]);
        assert!(!journal.is_balanced());
    }

    #[test]
    fn test_failing_sink_reports_os_error() {
        let key = ProtectedKey::new(
            PublicArea::from_bytes(vec![1]).unwrap(),
            PrivateArea::from_bytes(vec![2]).unwrap(),
        );
        let err = FailingSink.persist(&key).unwrap_err();
        assert_eq!(err.exit_code(), 13);
    }
}
