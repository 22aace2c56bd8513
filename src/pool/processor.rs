//! Pool entry points
//!
//! `initialize`, `mint`, `burn`, `swap`, `skim` and `transfer_shares` are
//! factory-only. `sync` is open to anyone. All of them respect the pool lock.

use solana_program::{msg, pubkey::Pubkey};

use crate::{
    constants::{BASIS_POINTS_DENOMINATOR, MINIMUM_INITIAL_LIQUIDITY, MINIMUM_LIQUIDITY},
    error::AmmError,
    interfaces::{FlashLedger, FlashSwapCallee, FlashSwapRequest},
    math::{integer_sqrt, mul_div, U256},
    pool::PoolState,
    runtime::InvokeContext,
    types::AmmEvent,
    utils::{
        token_transfers::transfer_exact,
        validation::{sort_tokens, validate_token_pair},
    },
};

/// Outputs requested from a pool swap, in canonical token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapArgs {
    pub amount_a_out: u64,
    pub amount_b_out: u64,
    pub recipient: Pubkey,
    /// Fee charged on the implied inputs inside the K check
    pub fee_bps: u16,
}

/// Borrower and opaque payload for a flash swap.
pub struct FlashCallback<'c> {
    pub callee: &'c mut dyn FlashSwapCallee,
    /// Account the callback may debit
    pub borrower: Pubkey,
    pub data: &'c [u8],
}

impl PoolState {
    /// One-time binding of the token pair. Tokens are stored in canonical order.
    pub fn initialize(
        &mut self,
        caller: &Pubkey,
        token_a: &Pubkey,
        token_b: &Pubkey,
    ) -> Result<(), AmmError> {
        self.ensure_factory(caller)?;
        if self.initialized {
            return Err(AmmError::AlreadyInitialized);
        }
        validate_token_pair(token_a, token_b)?;

        let (first, second) = sort_tokens(token_a, token_b);
        self.token_a = first;
        self.token_b = second;
        self.initialized = true;

        msg!("✅ Pool {} initialized: {} / {}", self.address, first, second);
        Ok(())
    }

    /// Credits shares for whatever the pool holds above its reserves.
    pub fn mint(
        &mut self,
        caller: &Pubkey,
        recipient: &Pubkey,
        growth_fee_to: Option<&Pubkey>,
        ctx: &mut InvokeContext,
    ) -> Result<u64, AmmError> {
        self.factory_entry(caller, |pool| {
            if *recipient == Pubkey::default() || *recipient == pool.address {
                return Err(AmmError::InvalidRecipient {
                    recipient: *recipient,
                });
            }

            let (balance_a, balance_b) = pool.balances(ctx);
            let amount_a = balance_a
                .checked_sub(pool.reserve_a)
                .ok_or(AmmError::ArithmeticOverflow)?;
            let amount_b = balance_b
                .checked_sub(pool.reserve_b)
                .ok_or(AmmError::ArithmeticOverflow)?;

            let fee_on = pool.mint_growth_fee(growth_fee_to, ctx.events)?;
            let total = pool.total_shares;

            let liquidity = if total == 0 {
                let root = integer_sqrt(amount_a as u128 * amount_b as u128);
                // sqrt of a u128 product of two u64 values always fits u64
                let root = root as u64;
                if root < MINIMUM_INITIAL_LIQUIDITY {
                    msg!(
                        "❌ Initial deposit too small: sqrt({} * {}) = {}",
                        amount_a,
                        amount_b,
                        root
                    );
                    return Err(AmmError::InitialDepositTooSmall {
                        liquidity: root,
                        minimum: MINIMUM_INITIAL_LIQUIDITY,
                    });
                }
                pool.mint_shares(&Pubkey::default(), MINIMUM_LIQUIDITY)?;
                root - MINIMUM_LIQUIDITY
            } else {
                mul_div(amount_a, total, pool.reserve_a)?.min(mul_div(
                    amount_b,
                    total,
                    pool.reserve_b,
                )?)
            };

            if liquidity == 0 {
                return Err(AmmError::InsufficientLiquidityMinted);
            }
            pool.mint_shares(recipient, liquidity)?;

            pool.update_reserves(balance_a, balance_b, ctx.now());
            if fee_on {
                pool.k_last = pool.reserve_a as u128 * pool.reserve_b as u128;
            }

            msg!(
                "✅ MINT: {} shares to {} for ({}, {})",
                liquidity,
                recipient,
                amount_a,
                amount_b
            );
            ctx.events.emit(AmmEvent::Mint {
                pool: pool.address,
                recipient: *recipient,
                amount_a,
                amount_b,
                shares: liquidity,
            });
            Ok(liquidity)
        })
    }

    /// Redeems the shares the pool holds for itself.
    ///
    /// Reserves, accumulators and the share ledger are final before any token
    /// leaves the pool.
    pub fn burn(
        &mut self,
        caller: &Pubkey,
        recipient: &Pubkey,
        growth_fee_to: Option<&Pubkey>,
        ctx: &mut InvokeContext,
    ) -> Result<(u64, u64), AmmError> {
        self.factory_entry(caller, |pool| {
            pool.ensure_valid_recipient(recipient)?;

            let (balance_a, balance_b) = pool.balances(ctx);
            let shares = pool.share_balance_of(&pool.address);

            let fee_on = pool.mint_growth_fee(growth_fee_to, ctx.events)?;
            let total = pool.total_shares;
            if total == 0 {
                return Err(AmmError::InsufficientLiquidityBurned {
                    shares,
                    amount_a: 0,
                    amount_b: 0,
                });
            }

            let amount_a = mul_div(shares, pool.reserve_a, total)?;
            let amount_b = mul_div(shares, pool.reserve_b, total)?;
            if amount_a == 0 || amount_b == 0 {
                return Err(AmmError::InsufficientLiquidityBurned {
                    shares,
                    amount_a,
                    amount_b,
                });
            }

            let address = pool.address;
            pool.burn_shares(&address, shares)?;
            let remaining_a = balance_a
                .checked_sub(amount_a)
                .ok_or(AmmError::ArithmeticOverflow)?;
            let remaining_b = balance_b
                .checked_sub(amount_b)
                .ok_or(AmmError::ArithmeticOverflow)?;
            pool.update_reserves(remaining_a, remaining_b, ctx.now());
            if fee_on {
                pool.k_last = pool.reserve_a as u128 * pool.reserve_b as u128;
            }

            ctx.events.emit(AmmEvent::Burn {
                pool: address,
                recipient: *recipient,
                amount_a,
                amount_b,
                shares,
            });

            transfer_exact(ctx.ledger, &pool.token_a, &address, recipient, amount_a)?;
            transfer_exact(ctx.ledger, &pool.token_b, &address, recipient, amount_b)?;

            msg!(
                "✅ BURN: {} shares -> ({}, {}) to {}",
                shares,
                amount_a,
                amount_b,
                recipient
            );
            Ok((amount_a, amount_b))
        })
    }

    /// Optimistic swap: pays the outputs, optionally runs a flash-swap
    /// callback, then derives the inputs from the resulting balances and
    /// enforces the fee-adjusted constant product. Returns the implied inputs.
    pub fn swap(
        &mut self,
        caller: &Pubkey,
        args: SwapArgs,
        flash: Option<FlashCallback<'_>>,
        ctx: &mut InvokeContext,
    ) -> Result<(u64, u64), AmmError> {
        self.factory_entry(caller, |pool| {
            let SwapArgs {
                amount_a_out,
                amount_b_out,
                recipient,
                fee_bps,
            } = args;

            if amount_a_out == 0 && amount_b_out == 0 {
                return Err(AmmError::InsufficientOutputAmount);
            }
            if amount_a_out >= pool.reserve_a {
                return Err(AmmError::InsufficientLiquidity {
                    requested: amount_a_out,
                    reserve: pool.reserve_a,
                });
            }
            if amount_b_out >= pool.reserve_b {
                return Err(AmmError::InsufficientLiquidity {
                    requested: amount_b_out,
                    reserve: pool.reserve_b,
                });
            }
            pool.ensure_valid_recipient(&recipient)?;

            let address = pool.address;
            transfer_exact(ctx.ledger, &pool.token_a, &address, &recipient, amount_a_out)?;
            transfer_exact(ctx.ledger, &pool.token_b, &address, &recipient, amount_b_out)?;

            if let Some(FlashCallback {
                callee,
                borrower,
                data,
            }) = flash
            {
                let request = FlashSwapRequest {
                    pool: address,
                    token_a: pool.token_a,
                    token_b: pool.token_b,
                    amount_a_out,
                    amount_b_out,
                    recipient,
                    borrower,
                    fee_bps,
                };
                msg!("🔄 Flash swap callback for borrower {}", borrower);
                let mut lent = FlashLedger::new(&mut *ctx.ledger, borrower);
                let result = callee.on_flash_swap(&mut lent, &request, data);
                if let Some(rejected) = lent.into_rejection() {
                    return Err(rejected);
                }
                result.map_err(|reason| AmmError::CallbackFailed { reason })?;
            }

            let (balance_a, balance_b) = pool.balances(ctx);
            let kept_a = pool.reserve_a - amount_a_out;
            let kept_b = pool.reserve_b - amount_b_out;
            let amount_a_in = balance_a.saturating_sub(kept_a);
            let amount_b_in = balance_b.saturating_sub(kept_b);
            if amount_a_in == 0 && amount_b_in == 0 {
                return Err(AmmError::InsufficientInputAmount);
            }

            let scale = U256::from(BASIS_POINTS_DENOMINATOR);
            let fee = U256::from(fee_bps);
            let adjusted_a = U256::from(balance_a) * scale - U256::from(amount_a_in) * fee;
            let adjusted_b = U256::from(balance_b) * scale - U256::from(amount_b_in) * fee;
            let k_after = adjusted_a * adjusted_b;
            let k_before =
                U256::from(pool.reserve_a) * U256::from(pool.reserve_b) * scale * scale;
            if k_after < k_before {
                msg!("❌ K decreased: {} -> {}", k_before, k_after);
                return Err(AmmError::KValueDecreased {
                    k_before: k_before.to_string(),
                    k_after: k_after.to_string(),
                });
            }

            pool.update_reserves(balance_a, balance_b, ctx.now());

            msg!(
                "✅ SWAP: in ({}, {}) out ({}, {}) reserves ({}, {})",
                amount_a_in,
                amount_b_in,
                amount_a_out,
                amount_b_out,
                pool.reserve_a,
                pool.reserve_b
            );
            ctx.events.emit(AmmEvent::PoolSwap {
                pool: address,
                amount_a_in,
                amount_b_in,
                amount_a_out,
                amount_b_out,
                recipient,
            });
            Ok((amount_a_in, amount_b_in))
        })
    }

    /// Pays out balances held above the recorded reserves.
    pub fn skim(
        &mut self,
        caller: &Pubkey,
        recipient: &Pubkey,
        ctx: &mut InvokeContext,
    ) -> Result<(u64, u64), AmmError> {
        self.factory_entry(caller, |pool| {
            pool.ensure_valid_recipient(recipient)?;

            let (balance_a, balance_b) = pool.balances(ctx);
            let excess_a = balance_a.saturating_sub(pool.reserve_a);
            let excess_b = balance_b.saturating_sub(pool.reserve_b);

            ctx.events.emit(AmmEvent::Skim {
                pool: pool.address,
                recipient: *recipient,
                amount_a: excess_a,
                amount_b: excess_b,
            });

            let address = pool.address;
            transfer_exact(ctx.ledger, &pool.token_a, &address, recipient, excess_a)?;
            transfer_exact(ctx.ledger, &pool.token_b, &address, recipient, excess_b)?;
            Ok((excess_a, excess_b))
        })
    }

    /// Permissionless: reserves := balances.
    pub fn sync(&mut self, ctx: &mut InvokeContext) -> Result<(), AmmError> {
        self.ensure_initialized()?;
        self.with_lock(|pool| {
            let (balance_a, balance_b) = pool.balances(ctx);
            pool.update_reserves(balance_a, balance_b, ctx.now());
            ctx.events.emit(AmmEvent::Sync {
                pool: pool.address,
                reserve_a: balance_a,
                reserve_b: balance_b,
            });
            Ok(())
        })
    }

    pub fn transfer_shares(
        &mut self,
        caller: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
        ctx: &mut InvokeContext,
    ) -> Result<(), AmmError> {
        self.factory_entry(caller, |pool| {
            if *to == Pubkey::default() {
                return Err(AmmError::InvalidRecipient { recipient: *to });
            }
            if amount == 0 {
                return Err(AmmError::ZeroAmount {
                    context: "share transfer".to_string(),
                });
            }
            pool.move_shares(from, to, amount)?;
            ctx.events.emit(AmmEvent::SharesTransferred {
                pool: pool.address,
                from: *from,
                to: *to,
                amount,
            });
            Ok(())
        })
    }

    fn balances(&self, ctx: &InvokeContext) -> (u64, u64) {
        (
            ctx.ledger.balance_of(&self.token_a, &self.address),
            ctx.ledger.balance_of(&self.token_b, &self.address),
        )
    }
}
