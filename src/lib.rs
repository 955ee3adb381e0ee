#![no_std]

multiversx_sc::imports!();

pub mod types;

use types::{ClaimResult, Member, Proposal, Stream};

// ============================================================
// Constants
// ============================================================

/// Voting window: 1440 blocks (~24 hours at one block per minute)
const VOTING_PERIOD_BLOCKS: u64 = 1_440;

/// Percentage denominator for vesting and partial claims
const PERCENT_DENOMINATOR: u64 = 100;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait DaoTreasury {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self) {
        self.proposal_count().set(0u64);
        self.stream_count().set(0u64);
        self.member_count().set(0u64);
        self.total_funded().set(BigUint::zero());
        self.committed_stream_total().set(BigUint::zero());
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: fund
    // Anyone can pay EGLD into the pool. All inflows go through
    // here, so totalFunded is the cumulative funding figure.
    // ========================================================

    #[endpoint(fund)]
    #[payable("EGLD")]
    fn fund(&self) {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().egld_value().clone_value();
        require!(payment > 0u64, "Payment must be positive");

        self.total_funded().update(|t| *t += &payment);

        self.fund_event(&caller, &payment);
    }

    // ========================================================
    // ENDPOINT: addMember
    // Owner-gated registry of voting weights. Re-adding an
    // address overwrites its record and re-stamps joined_at.
    // ========================================================

    #[only_owner]
    #[endpoint(addMember)]
    fn add_member(&self, address: ManagedAddress, weight: BigUint) {
        let joined_at = self.blockchain().get_block_nonce();

        if self.members(&address).is_empty() {
            self.member_count().update(|c| *c += 1);
        }

        let member = Member {
            joined_at,
            voting_weight: weight.clone(),
        };
        self.members(&address).set(&member);

        self.member_added_event(&address, &weight, joined_at);
    }

    // ========================================================
    // ENDPOINT: createProposal
    // Any member can propose a disbursement. Voting closes at
    // creation height + VOTING_PERIOD_BLOCKS.
    // ========================================================

    #[endpoint(createProposal)]
    fn create_proposal(
        &self,
        title: ManagedBuffer,
        description: ManagedBuffer,
        amount: BigUint,
        recipient: ManagedAddress,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        require!(
            !self.members(&caller).is_empty(),
            "Only members can propose"
        );
        require!(amount > 0u64, "Amount must be positive");
        require!(!recipient.is_zero(), "Recipient address cannot be zero");

        let proposal_id = self.proposal_count().get() + 1u64;
        let now = self.blockchain().get_block_nonce();
        let deadline = now + VOTING_PERIOD_BLOCKS;

        let proposal = Proposal {
            id: proposal_id,
            proposer: caller.clone(),
            title,
            description,
            recipient,
            amount,
            created_at: now,
            deadline,
            votes_for: BigUint::zero(),
            votes_against: BigUint::zero(),
            executed: false,
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);

        self.proposal_created_event(proposal_id, &caller, deadline);

        proposal_id
    }

    // ========================================================
    // ENDPOINT: voteOnProposal
    // Yes/No voting weighted by the member's current weight.
    // One vote per member per proposal.
    // ========================================================

    #[endpoint(voteOnProposal)]
    fn vote_on_proposal(&self, proposal_id: u64, support: bool) {
        let caller = self.blockchain().get_caller();
        require!(!self.members(&caller).is_empty(), "Only members can vote");
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(!proposal.executed, "Proposal already executed");

        let now = self.blockchain().get_block_nonce();
        require!(now < proposal.deadline, "Voting period has ended");

        require!(
            !self.has_voted(proposal_id, &caller).get(),
            "Already voted"
        );

        // Weight is read at vote time; the tally keeps whatever
        // weight the member had when the vote landed.
        let weight = self.members(&caller).get().voting_weight;
        if support {
            proposal.votes_for += &weight;
        } else {
            proposal.votes_against += &weight;
        }

        self.has_voted(proposal_id, &caller).set(true);
        self.proposals(proposal_id).set(&proposal);

        self.vote_event(proposal_id, &caller, support, &weight);
    }

    // ========================================================
    // ENDPOINT: executeProposal
    // Open to any caller once the deadline has passed. Resolves
    // the outcome exactly once: a passing proposal pays out, a
    // rejected one is finalized without a transfer.
    // ========================================================

    #[endpoint(executeProposal)]
    fn execute_proposal(&self, proposal_id: u64) -> u64 {
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(!proposal.executed, "Proposal already executed");

        let now = self.blockchain().get_block_nonce();
        require!(now >= proposal.deadline, "Voting period has not ended");

        // Simple majority over cast weight; ties reject.
        if proposal.votes_for > proposal.votes_against {
            let balance = self
                .blockchain()
                .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
            require!(
                balance >= proposal.amount,
                "Insufficient treasury balance"
            );

            proposal.executed = true;
            self.proposals(proposal_id).set(&proposal);

            self.send().direct_egld(&proposal.recipient, &proposal.amount);
            self.proposal_executed_event(proposal_id, &proposal.recipient, &proposal.amount);
        } else {
            proposal.executed = true;
            self.proposals(proposal_id).set(&proposal);

            self.proposal_rejected_event(proposal_id);
        }

        proposal_id
    }

    // ========================================================
    // ENDPOINT: createStream
    // Owner-gated vesting schedule. The total is reserved out of
    // the unencumbered pool balance up front, so stream
    // obligations can never jointly exceed the pool.
    // ========================================================

    #[only_owner]
    #[endpoint(createStream)]
    fn create_stream(
        &self,
        recipient: ManagedAddress,
        total_amount: BigUint,
        duration_blocks: u64,
    ) -> u64 {
        require!(total_amount > 0u64, "Amount must be positive");
        require!(duration_blocks > 0u64, "Duration must be positive");
        require!(!recipient.is_zero(), "Recipient address cannot be zero");

        require!(
            self.unencumbered_balance() >= total_amount,
            "Insufficient unencumbered balance"
        );

        let stream_id = self.stream_count().get() + 1u64;
        let start_height = self.blockchain().get_block_nonce();

        let stream = Stream {
            id: stream_id,
            recipient: recipient.clone(),
            total_amount: total_amount.clone(),
            start_height,
            duration_blocks,
            claimed_amount: BigUint::zero(),
        };

        self.streams(stream_id).set(&stream);
        self.stream_count().set(stream_id);
        self.committed_stream_total().update(|c| *c += &total_amount);

        self.stream_created_event(stream_id, &recipient, duration_blocks, &total_amount);

        stream_id
    }

    // ========================================================
    // ENDPOINT: claimStreamAdvanced
    // Recipient withdraws a percentage of the currently
    // claimable (vested but unclaimed) amount. A zero payout is
    // a valid claim and reports the current vesting state.
    // ========================================================

    #[endpoint(claimStreamAdvanced)]
    fn claim_stream_advanced(
        &self,
        stream_id: u64,
        percent_of_available: u64,
    ) -> ClaimResult<Self::Api> {
        require!(
            !self.streams(stream_id).is_empty(),
            "Stream does not exist"
        );

        let mut stream = self.streams(stream_id).get();
        let caller = self.blockchain().get_caller();
        require!(
            caller == stream.recipient,
            "Only the stream recipient can claim"
        );
        require!(
            percent_of_available <= PERCENT_DENOMINATOR,
            "Percent must be at most 100"
        );

        // Elapsed time is taken at call-execution height. The vested
        // amount and the reported percentage are two independent floor
        // computations of the same elapsed/duration ratio.
        let now = self.blockchain().get_block_nonce();
        let elapsed = core::cmp::min(now - stream.start_height, stream.duration_blocks);
        let vested = (&stream.total_amount * elapsed) / stream.duration_blocks;
        let vesting_percentage = elapsed * PERCENT_DENOMINATOR / stream.duration_blocks;

        let claimable = &vested - &stream.claimed_amount;
        let payout = (&claimable * percent_of_available) / PERCENT_DENOMINATOR;

        if payout > 0u64 {
            stream.claimed_amount += &payout;
            self.streams(stream_id).set(&stream);
            self.committed_stream_total().update(|c| *c -= &payout);

            self.send().direct_egld(&stream.recipient, &payout);
            self.stream_claimed_event(stream_id, &stream.recipient, &payout);
        }

        let remaining = &stream.total_amount - &stream.claimed_amount;

        ClaimResult {
            vesting_percentage,
            amount_claimed: payout,
            total_claimed: stream.claimed_amount,
            remaining,
        }
    }

    // ========================================================
    // INTERNAL: unencumbered balance
    // Pool balance minus the outstanding (unclaimed) stream
    // totals. Executed proposals draw on the raw balance, so the
    // difference can transiently be smaller than the commitments.
    // ========================================================

    fn unencumbered_balance(&self) -> BigUint {
        let balance = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
        let committed = self.committed_stream_total().get();
        if balance > committed {
            balance - committed
        } else {
            BigUint::zero()
        }
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getMember)]
    fn get_member(&self, address: ManagedAddress) -> OptionalValue<Member<Self::Api>> {
        if self.members(&address).is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(self.members(&address).get())
        }
    }

    #[view(getProposal)]
    fn get_proposal(&self, id: u64) -> OptionalValue<Proposal<Self::Api>> {
        if self.proposals(id).is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(self.proposals(id).get())
        }
    }

    #[view(getProposals)]
    fn get_proposals(&self, from: u64, count: u64) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        if count == 0 {
            return result;
        }
        let total = self.proposal_count().get();
        if total == 0 {
            return result;
        }
        let start = if from == 0 { 1u64 } else { from };
        if start > total {
            return result;
        }
        let end = core::cmp::min(start.saturating_add(count - 1), total);

        for id in start..=end {
            if !self.proposals(id).is_empty() {
                result.push(self.proposals(id).get());
            }
        }
        result
    }

    #[view(hasVoted)]
    fn has_member_voted(&self, proposal_id: u64, address: ManagedAddress) -> bool {
        self.has_voted(proposal_id, &address).get()
    }

    #[view(getStream)]
    fn get_stream(&self, id: u64) -> OptionalValue<Stream<Self::Api>> {
        if self.streams(id).is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(self.streams(id).get())
        }
    }

    #[view(getTreasuryBalance)]
    fn get_treasury_balance(&self) -> BigUint {
        self.blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0)
    }

    #[view(getUnencumberedBalance)]
    fn get_unencumbered_balance(&self) -> BigUint {
        self.unencumbered_balance()
    }

    #[view(getTreasuryStats)]
    fn get_treasury_stats(&self) -> MultiValue6<BigUint, BigUint, BigUint, u64, u64, u64> {
        let balance = self
            .blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
        let funded = self.total_funded().get();
        let committed = self.committed_stream_total().get();
        let members = self.member_count().get();
        let proposals = self.proposal_count().get();
        let streams = self.stream_count().get();
        (balance, funded, committed, members, proposals, streams).into()
    }

    #[view(getContractConfig)]
    fn get_contract_config(&self) -> u64 {
        VOTING_PERIOD_BLOCKS
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("fund")]
    fn fund_event(&self, #[indexed] funder: &ManagedAddress, amount: &BigUint);

    #[event("memberAdded")]
    fn member_added_event(
        &self,
        #[indexed] member: &ManagedAddress,
        #[indexed] weight: &BigUint,
        joined_at: u64,
    );

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        deadline: u64,
    );

    #[event("vote")]
    fn vote_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] support: bool,
        weight: &BigUint,
    );

    #[event("proposalExecuted")]
    fn proposal_executed_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] recipient: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("proposalRejected")]
    fn proposal_rejected_event(&self, #[indexed] proposal_id: u64);

    #[event("streamCreated")]
    fn stream_created_event(
        &self,
        #[indexed] stream_id: u64,
        #[indexed] recipient: &ManagedAddress,
        #[indexed] duration_blocks: u64,
        total_amount: &BigUint,
    );

    #[event("streamClaimed")]
    fn stream_claimed_event(
        &self,
        #[indexed] stream_id: u64,
        #[indexed] recipient: &ManagedAddress,
        amount: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Membership registry ──

    #[storage_mapper("members")]
    fn members(&self, address: &ManagedAddress) -> SingleValueMapper<Member<Self::Api>>;

    #[storage_mapper("memberCount")]
    fn member_count(&self) -> SingleValueMapper<u64>;

    // ── Proposals ──

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[storage_mapper("hasVoted")]
    fn has_voted(&self, proposal_id: u64, voter: &ManagedAddress) -> SingleValueMapper<bool>;

    // ── Streams ──

    #[storage_mapper("streamCount")]
    fn stream_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("streams")]
    fn streams(&self, id: u64) -> SingleValueMapper<Stream<Self::Api>>;

    /// Sum over all streams of (total_amount - claimed_amount)
    #[storage_mapper("committedStreamTotal")]
    fn committed_stream_total(&self) -> SingleValueMapper<BigUint>;

    // ── Pool accounting ──

    /// Cumulative amount ever paid into the pool through fund()
    #[storage_mapper("totalFunded")]
    fn total_funded(&self) -> SingleValueMapper<BigUint>;
}
