//! In-memory collaborators for exercising the engine without a validator.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Debug;

use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::states::{Collaborator, EcoProof, RewardConfig, Shipment, UserStats};
use super::distributor::Distributor;
use super::gateways::{ClaimReceipt, ClaimStore, EcoVerifier, ShipmentRegistry, TokenGateway};

pub fn error_code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(error) => error.error_code_number,
        anchor_lang::error::Error::ProgramError(error) => panic!("unexpected program error: {error:?}"),
    }
}

pub fn assert_error<T: Debug>(result: Result<T>, expected: ErrorCode) {
    match result {
        Ok(value) => panic!("expected {expected:?}, got Ok({value:?})"),
        Err(err) => assert_eq!(
            error_code(err),
            expected as u32 + anchor_lang::error::ERROR_CODE_OFFSET,
            "expected {expected:?}"
        ),
    }
}

#[derive(Default)]
pub struct MemoryRegistry {
    program: Pubkey,
    shipments: RefCell<HashMap<u64, Shipment>>,
    queries: Cell<usize>,
}

impl MemoryRegistry {
    pub fn insert(&self, shipment_id: u64, shipment: Shipment) {
        self.shipments.borrow_mut().insert(shipment_id, shipment);
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }
}

impl ShipmentRegistry for MemoryRegistry {
    fn get_shipment(&self, registry: &Pubkey, shipment_id: u64) -> Result<Shipment> {
        self.queries.set(self.queries.get() + 1);
        require_keys_eq!(*registry, self.program, ErrorCode::InvalidShipment);
        self.shipments
            .borrow()
            .get(&shipment_id)
            .copied()
            .ok_or_else(|| error!(ErrorCode::InvalidShipment))
    }
}

#[derive(Default)]
pub struct MemoryVerifier {
    program: Pubkey,
    proofs: RefCell<HashMap<u64, EcoProof>>,
}

impl MemoryVerifier {
    pub fn insert(&self, shipment_id: u64, proof: EcoProof) {
        self.proofs.borrow_mut().insert(shipment_id, proof);
    }
}

impl EcoVerifier for MemoryVerifier {
    fn verify_eco(&self, verifier: &Pubkey, shipment_id: u64) -> Result<EcoProof> {
        require_keys_eq!(*verifier, self.program, ErrorCode::InvalidEcoProof);
        self.proofs
            .borrow()
            .get(&shipment_id)
            .copied()
            .ok_or_else(|| error!(ErrorCode::InvalidEcoProof))
    }
}

/// Records transfers; can be switched to reject them
#[derive(Default)]
pub struct MemoryToken {
    pub transfers: Vec<(Pubkey, u64, Pubkey)>,
    pub reject: bool,
}

impl TokenGateway for MemoryToken {
    fn transfer(&mut self, mint: &Pubkey, amount: u64, recipient: &Pubkey) -> Result<()> {
        if self.reject {
            return Err(ProgramError::InsufficientFunds.into());
        }
        self.transfers.push((*mint, amount, *recipient));
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryClaimStore {
    pub claimed: HashMap<u64, ClaimReceipt>,
    pub history: Vec<ClaimReceipt>,
}

impl ClaimStore for MemoryClaimStore {
    fn is_claimed(&self, shipment_id: u64) -> Result<bool> {
        Ok(self.claimed.contains_key(&shipment_id))
    }

    fn record(&mut self, receipt: &ClaimReceipt) -> Result<()> {
        self.claimed.insert(receipt.shipment_id, *receipt);
        self.history.push(*receipt);
        Ok(())
    }
}

/// A configured engine: collaborators set, empty pool, default policy
pub struct Harness {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub config: RewardConfig,
    pub registry: MemoryRegistry,
    pub verifier: MemoryVerifier,
    pub token: MemoryToken,
    pub claims: MemoryClaimStore,
}

impl Harness {
    pub fn ready() -> Self {
        let admin = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let registry_program = Pubkey::new_unique();
        let verifier_program = Pubkey::new_unique();

        let mut config = RewardConfig::new(admin, 255, 255);
        config.set_collaborator(&admin, Collaborator::TokenMint, mint).unwrap();
        config.set_collaborator(&admin, Collaborator::RegistryProgram, registry_program).unwrap();
        config.set_collaborator(&admin, Collaborator::VerifierProgram, verifier_program).unwrap();

        Self {
            admin,
            mint,
            config,
            registry: MemoryRegistry { program: registry_program, ..Default::default() },
            verifier: MemoryVerifier { program: verifier_program, ..Default::default() },
            token: MemoryToken::default(),
            claims: MemoryClaimStore::default(),
        }
    }

    pub fn funded(amount: u64) -> Self {
        let mut harness = Self::ready();
        let admin = harness.admin;
        harness.config.fund(&admin, amount).unwrap();
        harness
    }

    /// Registers a shipment together with its eco proof
    pub fn ship(&self, shipment_id: u64, weight: u64, bulk: bool, is_eco: bool, timestamp: i64) {
        self.registry.insert(shipment_id, Shipment { weight, bulk, timestamp });
        self.verifier.insert(shipment_id, EcoProof { is_eco });
    }

    pub fn distributor(
        &mut self,
    ) -> Distributor<'_, MemoryRegistry, MemoryVerifier, MemoryToken, MemoryClaimStore> {
        Distributor::new(
            &mut self.config,
            &self.registry,
            &self.verifier,
            &mut self.token,
            &mut self.claims,
        )
    }

    pub fn claimant() -> UserStats {
        UserStats::new(Pubkey::new_unique(), 0)
    }
}
