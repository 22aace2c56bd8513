//! Factory state
//!
//! Pool registry, pool-creator allow-list, fee parameters and the emergency
//! pause/quorum state. Everything here is fixed at genesis except what the
//! quorum path and pool creation change afterwards.

use std::collections::{BTreeMap, BTreeSet};

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

use crate::{
    constants::{BASIS_POINTS_DENOMINATOR, EMERGENCY_SIGNER_COUNT},
    error::AmmError,
    utils::fee_validation::validate_fee_parameters,
};

/// Protocol fee configuration.
///
/// `lp_fee_share_bps + vault_fee_share_bps == 10_000` always holds.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct FeeParameters {
    pub protocol_fee_bps: u16,
    pub lp_fee_share_bps: u16,
    pub vault_fee_share_bps: u16,
    pub fee_vault: Pubkey,
}

impl FeeParameters {
    /// Caller validates the inputs first (see `validate_fee_parameters`).
    pub fn new(protocol_fee_bps: u16, lp_fee_share_bps: u16, fee_vault: Pubkey) -> Self {
        Self {
            protocol_fee_bps,
            lp_fee_share_bps,
            vault_fee_share_bps: (BASIS_POINTS_DENOMINATOR as u16).saturating_sub(lp_fee_share_bps),
            fee_vault,
        }
    }
}

/// Deployment-time configuration.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenesisConfig {
    /// Seeded as the first allowed pool creator
    pub deployer: Pubkey,
    pub emergency_signers: [Pubkey; EMERGENCY_SIGNER_COUNT],
    pub protocol_fee_bps: u16,
    pub lp_fee_share_bps: u16,
    pub fee_vault: Pubkey,
    /// Turns on the growth fee when set
    pub growth_fee_recipient: Option<Pubkey>,
}

impl GenesisConfig {
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.deployer == Pubkey::default() {
            return Err(AmmError::InvalidGenesisConfig {
                reason: "deployer cannot be the null identity".to_string(),
            });
        }
        if self.fee_vault == Pubkey::default() {
            return Err(AmmError::InvalidGenesisConfig {
                reason: "fee vault cannot be the null identity".to_string(),
            });
        }
        if self.growth_fee_recipient == Some(Pubkey::default()) {
            return Err(AmmError::InvalidGenesisConfig {
                reason: "growth fee recipient cannot be the null identity".to_string(),
            });
        }

        for (index, signer) in self.emergency_signers.iter().enumerate() {
            if *signer == Pubkey::default() {
                return Err(AmmError::InvalidSignerSet {
                    reason: format!("emergency signer {} is the null identity", index),
                });
            }
            if self.emergency_signers[..index].contains(signer) {
                return Err(AmmError::InvalidSignerSet {
                    reason: format!("emergency signer {} is listed twice", signer),
                });
            }
        }

        validate_fee_parameters(self.protocol_fee_bps, self.lp_fee_share_bps)
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct FactoryState {
    pub deployer: Pubkey,
    pub emergency_signers: [Pubkey; EMERGENCY_SIGNER_COUNT],
    pub fees: FeeParameters,
    pub growth_fee_recipient: Option<Pubkey>,

    /// Canonical (token_a, token_b) -> pool id
    pub pool_registry: BTreeMap<(Pubkey, Pubkey), Pubkey>,
    /// Creation order, append-only
    pub pool_list: Vec<Pubkey>,
    pub allowed_creators: BTreeSet<Pubkey>,

    pub global_paused: bool,
    pub paused_pools: BTreeSet<Pubkey>,
    /// Last nonce accepted on the quorum path
    pub emergency_nonce: u64,
}

impl FactoryState {
    pub fn from_genesis(config: &GenesisConfig) -> Result<Self, AmmError> {
        config.validate()?;

        let mut allowed_creators = BTreeSet::new();
        allowed_creators.insert(config.deployer);

        msg!(
            "🏭 Factory genesis: fee {} bps, LP share {} bps, growth fee {}",
            config.protocol_fee_bps,
            config.lp_fee_share_bps,
            if config.growth_fee_recipient.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            deployer: config.deployer,
            emergency_signers: config.emergency_signers,
            fees: FeeParameters::new(
                config.protocol_fee_bps,
                config.lp_fee_share_bps,
                config.fee_vault,
            ),
            growth_fee_recipient: config.growth_fee_recipient,
            pool_registry: BTreeMap::new(),
            pool_list: Vec::new(),
            allowed_creators,
            global_paused: false,
            paused_pools: BTreeSet::new(),
            emergency_nonce: 0,
        })
    }

    pub fn pool_for_pair(&self, token_a: &Pubkey, token_b: &Pubkey) -> Option<Pubkey> {
        let key = if token_a < token_b {
            (*token_a, *token_b)
        } else {
            (*token_b, *token_a)
        };
        self.pool_registry.get(&key).copied()
    }

    pub fn is_allowed_creator(&self, creator: &Pubkey) -> bool {
        self.allowed_creators.contains(creator)
    }

    pub fn is_emergency_signer(&self, signer: &Pubkey) -> bool {
        self.emergency_signers.contains(signer)
    }
}
