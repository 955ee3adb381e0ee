multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Member — weighted voter record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Member<M: ManagedTypeApi> {
    /// Block height at which the owner added (or last re-added) this member
    pub joined_at: u64,
    pub voting_weight: BigUint<M>,
}

// ============================================================
// Proposal — the core governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub proposer: ManagedAddress<M>,
    pub title: ManagedBuffer<M>,
    pub description: ManagedBuffer<M>,
    pub recipient: ManagedAddress<M>,
    pub amount: BigUint<M>,
    pub created_at: u64,
    /// Block height at which voting closes and execution unlocks
    pub deadline: u64,
    pub votes_for: BigUint<M>,
    pub votes_against: BigUint<M>,
    /// Flips false -> true exactly once, at deadline resolution.
    /// A rejected proposal is finalized the same way so it cannot
    /// be evaluated a second time against a later pool.
    pub executed: bool,
}

// ============================================================
// Stream — linear vesting schedule
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Stream<M: ManagedTypeApi> {
    pub id: u64,
    pub recipient: ManagedAddress<M>,
    pub total_amount: BigUint<M>,
    pub start_height: u64,
    pub duration_blocks: u64,
    /// Strictly increasing, never above the vested amount at claim height
    pub claimed_amount: BigUint<M>,
}

// ============================================================
// ClaimResult — success payload of claimStreamAdvanced
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ClaimResult<M: ManagedTypeApi> {
    /// floor(min(elapsed, duration) * 100 / duration), computed
    /// independently of the vested amount
    pub vesting_percentage: u64,
    pub amount_claimed: BigUint<M>,
    pub total_claimed: BigUint<M>,
    pub remaining: BigUint<M>,
}
