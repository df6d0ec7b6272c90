//! Engine collaborators backed by Solana accounts and CPIs.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount};
use anchor_spl::token::{self, Transfer};
use crate::constants::{CLAIM_RECORD_SEED, ECO_PROOF_SEED, POOL_AUTHORITY_SEED, SHIPMENT_SEED};
use crate::engine::{ClaimReceipt, ClaimStore, EcoVerifier, ShipmentRegistry, TokenGateway};
use crate::errors::ErrorCode;
use crate::events::RewardDistributed;
use crate::states::{ClaimRecord, EcoProof, Shipment};

/// Length of the account discriminator written by the collaborator programs
const EXTERNAL_DISCRIMINATOR_LEN: usize = 8;

/// Reads a fact published by `program` under the PDA `[seed, id]`.
/// Missing, foreign-owned or undecodable accounts yield None.
fn read_external<T: AnchorDeserialize>(
    accounts: &[AccountInfo],
    program: &Pubkey,
    seed: &[u8],
    id: u64,
) -> Option<T> {
    let (address, _) = Pubkey::find_program_address(&[seed, &id.to_le_bytes()], program);
    let info = accounts.iter().find(|info| *info.key == address)?;
    if info.owner != program {
        return None;
    }

    let data = info.try_borrow_data().ok()?;
    let mut payload = data.get(EXTERNAL_DISCRIMINATOR_LEN..)?;
    T::deserialize(&mut payload).ok()
}

/// Shipment accounts passed into the instruction
pub struct ShipmentAccounts<'a, 'info> {
    accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> ShipmentAccounts<'a, 'info> {
    pub fn new(accounts: &'a [AccountInfo<'info>]) -> Self {
        Self { accounts }
    }
}

impl ShipmentRegistry for ShipmentAccounts<'_, '_> {
    fn get_shipment(&self, registry: &Pubkey, shipment_id: u64) -> Result<Shipment> {
        read_external(self.accounts, registry, SHIPMENT_SEED, shipment_id)
            .ok_or_else(|| error!(ErrorCode::InvalidShipment))
    }
}

/// Eco proof accounts passed into the instruction
pub struct EcoProofAccounts<'a, 'info> {
    accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> EcoProofAccounts<'a, 'info> {
    pub fn new(accounts: &'a [AccountInfo<'info>]) -> Self {
        Self { accounts }
    }
}

impl EcoVerifier for EcoProofAccounts<'_, '_> {
    fn verify_eco(&self, verifier: &Pubkey, shipment_id: u64) -> Result<EcoProof> {
        read_external(self.accounts, verifier, ECO_PROOF_SEED, shipment_id)
            .ok_or_else(|| error!(ErrorCode::InvalidEcoProof))
    }
}

/// Pays rewards out of the pool vault, signed by the pool authority PDA
pub struct VaultTransfer<'info> {
    pub token_program: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub vault_mint: Pubkey,
    pub pool_authority: AccountInfo<'info>,
    pub pool_authority_bump: u8,
    pub recipient_account: AccountInfo<'info>,
    pub recipient_owner: Pubkey,
}

impl TokenGateway for VaultTransfer<'_> {
    fn transfer(&mut self, mint: &Pubkey, amount: u64, recipient: &Pubkey) -> Result<()> {
        require_keys_eq!(*mint, self.vault_mint, ErrorCode::InvalidTokenAccount);
        require_keys_eq!(*recipient, self.recipient_owner, ErrorCode::InvalidTokenAccount);

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: self.recipient_account.clone(),
                    authority: self.pool_authority.clone(),
                },
                &[&[POOL_AUTHORITY_SEED, &[self.pool_authority_bump]]],
            ),
            amount,
        )?;

        msg!("Transferred {} reward tokens to {}", amount, recipient);
        Ok(())
    }
}

/// Claim record PDAs; records are created on first payout
pub struct ClaimRecordAccounts<'a, 'info> {
    payer: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> ClaimRecordAccounts<'a, 'info> {
    pub fn new(
        payer: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        accounts: &'a [AccountInfo<'info>],
    ) -> Self {
        Self { payer, system_program, accounts }
    }

    fn locate(&self, shipment_id: u64) -> Result<(&'a AccountInfo<'info>, u8)> {
        let (address, bump) = Pubkey::find_program_address(
            &[CLAIM_RECORD_SEED, &shipment_id.to_le_bytes()],
            &crate::ID,
        );
        let info = self.accounts
            .iter()
            .find(|info| *info.key == address)
            .ok_or(ErrorCode::InvalidClaimRecord)?;
        Ok((info, bump))
    }

    /// Creates the claim record PDA. Lamports sent to the address beforehand
    /// are kept: the account is topped up, allocated and assigned instead.
    fn create(&self, info: &AccountInfo<'info>, shipment_id: u64, bump: u8) -> Result<()> {
        let space = ClaimRecord::DISCRIMINATOR.len() + ClaimRecord::INIT_SPACE;
        let required = Rent::get()?.minimum_balance(space);
        let id_bytes = shipment_id.to_le_bytes();
        let bump_bytes = [bump];
        let signer_seeds: &[&[&[u8]]] = &[&[CLAIM_RECORD_SEED, &id_bytes, &bump_bytes]];

        match RecordFunding::plan(info.lamports(), required) {
            RecordFunding::Create { lamports } => system_program::create_account(
                CpiContext::new_with_signer(
                    self.system_program.clone(),
                    CreateAccount {
                        from: self.payer.clone(),
                        to: info.clone(),
                    },
                    signer_seeds,
                ),
                lamports,
                space as u64,
                &crate::ID,
            ),
            RecordFunding::Adopt { top_up } => {
                msg!("Claim record for shipment {} was prefunded", shipment_id);
                if top_up > 0 {
                    system_program::transfer(
                        CpiContext::new(
                            self.system_program.clone(),
                            system_program::Transfer {
                                from: self.payer.clone(),
                                to: info.clone(),
                            },
                        ),
                        top_up,
                    )?;
                }
                system_program::allocate(
                    CpiContext::new_with_signer(
                        self.system_program.clone(),
                        Allocate { account_to_allocate: info.clone() },
                        signer_seeds,
                    ),
                    space as u64,
                )?;
                system_program::assign(
                    CpiContext::new_with_signer(
                        self.system_program.clone(),
                        Assign { account_to_assign: info.clone() },
                        signer_seeds,
                    ),
                    &crate::ID,
                )
            }
        }
    }
}

/// How a claim record address gets its rent-exempt balance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RecordFunding {
    /// Empty address: a plain `create_account`
    Create { lamports: u64 },
    /// Address already holds lamports, which `create_account` refuses
    Adopt { top_up: u64 },
}

impl RecordFunding {
    fn plan(current_lamports: u64, required: u64) -> Self {
        if current_lamports == 0 {
            Self::Create { lamports: required }
        } else {
            Self::Adopt { top_up: required.saturating_sub(current_lamports) }
        }
    }
}

impl ClaimStore for ClaimRecordAccounts<'_, '_> {
    fn is_claimed(&self, shipment_id: u64) -> Result<bool> {
        let (info, _) = self.locate(shipment_id)?;
        if info.data_is_empty() {
            return Ok(false);
        }
        require_keys_eq!(*info.owner, crate::ID, ErrorCode::InvalidClaimRecord);

        let data = info.try_borrow_data()?;
        let record = ClaimRecord::try_deserialize(&mut &data[..])?;
        Ok(record.claimed)
    }

    fn record(&mut self, receipt: &ClaimReceipt) -> Result<()> {
        let (info, bump) = self.locate(receipt.shipment_id)?;
        if info.data_is_empty() {
            self.create(info, receipt.shipment_id, bump)?;
        }

        let record = ClaimRecord {
            shipment_id: receipt.shipment_id,
            claimant: receipt.claimant,
            amount: receipt.amount,
            sequence: receipt.sequence,
            claimed_at: receipt.timestamp,
            claimed: true,
            bump,
        };
        let mut data = info.try_borrow_mut_data()?;
        record.try_serialize(&mut &mut data[..])?;

        emit!(RewardDistributed {
            sequence: receipt.sequence,
            shipment_id: receipt.shipment_id,
            claimant: receipt.claimant,
            amount: receipt.amount,
            timestamp: receipt.timestamp,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::assert_error;

    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl TestAccount {
        fn new(key: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
            Self { key, owner, lamports: 1_000_000, data }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    fn pda(seed: &[u8], id: u64, program: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[seed, &id.to_le_bytes()], program).0
    }

    /// Account data as the collaborator programs lay it out
    fn external_data<T: AnchorSerialize>(value: &T) -> Vec<u8> {
        let mut data = vec![7u8; EXTERNAL_DISCRIMINATOR_LEN];
        value.serialize(&mut data).unwrap();
        data
    }

    fn shipment() -> Shipment {
        Shipment { weight: 120, bulk: true, timestamp: 1_700_000_000 }
    }

    #[test]
    fn test_reads_shipment_from_registry_pda() {
        let registry = Pubkey::new_unique();
        let mut account = TestAccount::new(pda(SHIPMENT_SEED, 7, &registry), registry, external_data(&shipment()));
        let accounts = [account.info()];

        let gateway = ShipmentAccounts::new(&accounts);
        assert_eq!(gateway.get_shipment(&registry, 7).unwrap(), shipment());
        // Same account, different id: the address no longer matches
        assert_error(gateway.get_shipment(&registry, 8), ErrorCode::InvalidShipment);
    }

    #[test]
    fn test_shipment_owned_by_another_program_is_absent() {
        let registry = Pubkey::new_unique();
        let mut account = TestAccount::new(
            pda(SHIPMENT_SEED, 7, &registry),
            Pubkey::new_unique(),
            external_data(&shipment()),
        );
        let accounts = [account.info()];

        assert_error(
            ShipmentAccounts::new(&accounts).get_shipment(&registry, 7),
            ErrorCode::InvalidShipment,
        );
    }

    #[test]
    fn test_truncated_shipment_is_absent() {
        let registry = Pubkey::new_unique();
        let mut data = external_data(&shipment());
        data.truncate(EXTERNAL_DISCRIMINATOR_LEN + 4);
        let mut short = TestAccount::new(pda(SHIPMENT_SEED, 1, &registry), registry, data);
        let mut tiny = TestAccount::new(pda(SHIPMENT_SEED, 2, &registry), registry, vec![0; 4]);
        let accounts = [short.info(), tiny.info()];

        let gateway = ShipmentAccounts::new(&accounts);
        assert_error(gateway.get_shipment(&registry, 1), ErrorCode::InvalidShipment);
        assert_error(gateway.get_shipment(&registry, 2), ErrorCode::InvalidShipment);
    }

    #[test]
    fn test_reads_eco_proof_from_verifier_pda() {
        let verifier = Pubkey::new_unique();
        let proof = EcoProof { is_eco: true };
        let mut account = TestAccount::new(pda(ECO_PROOF_SEED, 3, &verifier), verifier, external_data(&proof));
        let accounts = [account.info()];

        let gateway = EcoProofAccounts::new(&accounts);
        assert_eq!(gateway.verify_eco(&verifier, 3).unwrap(), proof);
        assert_error(gateway.verify_eco(&Pubkey::new_unique(), 3), ErrorCode::InvalidEcoProof);
    }

    #[test]
    fn test_claim_record_must_be_supplied() {
        let mut payer = TestAccount::new(Pubkey::new_unique(), system_program::ID, vec![]);
        let mut system = TestAccount::new(system_program::ID, Pubkey::default(), vec![]);
        let mut other = TestAccount::new(pda(CLAIM_RECORD_SEED, 2, &crate::ID), system_program::ID, vec![]);
        let accounts = [other.info()];

        let store = ClaimRecordAccounts::new(payer.info(), system.info(), &accounts);
        assert_error(store.is_claimed(1), ErrorCode::InvalidClaimRecord);
    }

    #[test]
    fn test_prefunded_claim_record_is_unclaimed() {
        let mut payer = TestAccount::new(Pubkey::new_unique(), system_program::ID, vec![]);
        let mut system = TestAccount::new(system_program::ID, Pubkey::default(), vec![]);
        let mut record = TestAccount::new(pda(CLAIM_RECORD_SEED, 5, &crate::ID), system_program::ID, vec![]);
        record.lamports = 1;
        let accounts = [record.info()];

        let store = ClaimRecordAccounts::new(payer.info(), system.info(), &accounts);
        assert!(!store.is_claimed(5).unwrap());
    }

    #[test]
    fn test_prefunded_address_is_adopted() {
        assert_eq!(RecordFunding::plan(0, 1_500), RecordFunding::Create { lamports: 1_500 });
        assert_eq!(RecordFunding::plan(1, 1_500), RecordFunding::Adopt { top_up: 1_499 });
        assert_eq!(RecordFunding::plan(1_500, 1_500), RecordFunding::Adopt { top_up: 0 });
        assert_eq!(RecordFunding::plan(9_000, 1_500), RecordFunding::Adopt { top_up: 0 });
    }

    #[test]
    fn test_foreign_claim_record_is_rejected() {
        let mut payer = TestAccount::new(Pubkey::new_unique(), system_program::ID, vec![]);
        let mut system = TestAccount::new(system_program::ID, Pubkey::default(), vec![]);
        let mut record = TestAccount::new(
            pda(CLAIM_RECORD_SEED, 5, &crate::ID),
            Pubkey::new_unique(),
            vec![1; 16],
        );
        let accounts = [record.info()];

        let store = ClaimRecordAccounts::new(payer.info(), system.info(), &accounts);
        assert_error(store.is_claimed(5), ErrorCode::InvalidClaimRecord);
    }

    #[test]
    fn test_recorded_claim_reads_back() {
        let mut payer = TestAccount::new(Pubkey::new_unique(), system_program::ID, vec![]);
        let mut system = TestAccount::new(system_program::ID, Pubkey::default(), vec![]);
        let space = ClaimRecord::DISCRIMINATOR.len() + ClaimRecord::INIT_SPACE;
        let mut record = TestAccount::new(pda(CLAIM_RECORD_SEED, 9, &crate::ID), crate::ID, vec![0; space]);
        let accounts = [record.info()];
        let claimant = Pubkey::new_unique();

        let mut store = ClaimRecordAccounts::new(payer.info(), system.info(), &accounts);
        store
            .record(&ClaimReceipt { shipment_id: 9, claimant, amount: 126, sequence: 3, timestamp: 50 })
            .unwrap();
        assert!(store.is_claimed(9).unwrap());

        let data = accounts[0].try_borrow_data().unwrap();
        let stored = ClaimRecord::try_deserialize(&mut &data[..]).unwrap();
        assert_eq!(stored.shipment_id, 9);
        assert_eq!(stored.claimant, claimant);
        assert_eq!(stored.amount, 126);
        assert_eq!(stored.sequence, 3);
        assert_eq!(stored.claimed_at, 50);
        assert!(stored.claimed);
    }

    #[test]
    fn test_vault_transfer_checks_mint_and_recipient() {
        let mut token_program = TestAccount::new(anchor_spl::token::ID, Pubkey::default(), vec![]);
        let mut vault = TestAccount::new(Pubkey::new_unique(), anchor_spl::token::ID, vec![]);
        let mut authority = TestAccount::new(Pubkey::new_unique(), system_program::ID, vec![]);
        let mut recipient = TestAccount::new(Pubkey::new_unique(), anchor_spl::token::ID, vec![]);
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let mut transfer = VaultTransfer {
            token_program: token_program.info(),
            vault: vault.info(),
            vault_mint: mint,
            pool_authority: authority.info(),
            pool_authority_bump: 255,
            recipient_account: recipient.info(),
            recipient_owner: owner,
        };
        assert_error(transfer.transfer(&Pubkey::new_unique(), 10, &owner), ErrorCode::InvalidTokenAccount);
        assert_error(transfer.transfer(&mint, 10, &Pubkey::new_unique()), ErrorCode::InvalidTokenAccount);
    }
}
