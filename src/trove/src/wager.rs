//! Double-or-nothing coin toss.
//!
//! A streak starts by staking `bet`, which seeds the pot with `bet * 2`. Each
//! won flip doubles the pot; a lost flip busts and forfeits it. The player
//! may bank the pot at any point between flips. The balance is touched
//! exactly twice per streak at most: the initial debit and the cash-out
//! credit.

mod scheduler;

pub use scheduler::{ManualScheduler, Scheduler};

use crate::balance::{BalanceStore, InsufficientFunds};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// How long the flip animation runs before the result is revealed
pub const FLIP_DELAY: Duration = Duration::from_millis(600);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WagerError {
    #[error(transparent)]
    InsufficientFunds(#[from] InsufficientFunds),

    #[error("A flip is already in progress")]
    FlipInProgress,

    #[error("Cannot {action} while {phase}")]
    InvalidState {
        action: &'static str,
        phase: WagerPhase,
    },

    #[error("Bet must be greater than zero")]
    ZeroBet,

    #[error("Flip does not match the pending flip")]
    StaleFlip,

    #[error("Invalid coin side: {0}")]
    InvalidSide(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    /// Fair coin
    pub fn toss<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CoinSide::Heads => CoinSide::Tails,
            CoinSide::Tails => CoinSide::Heads,
        }
    }
}

impl std::fmt::Display for CoinSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "heads"),
            CoinSide::Tails => write!(f, "tails"),
        }
    }
}

impl std::str::FromStr for CoinSide {
    type Err = WagerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heads" | "h" => Ok(CoinSide::Heads),
            "tails" | "t" => Ok(CoinSide::Tails),
            _ => Err(WagerError::InvalidSide(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagerPhase {
    /// No active streak
    Idle,
    /// Bet committed, result pending
    Flipping,
    /// Last flip won; flip again or cash out
    Ready,
    /// Last flip lost; terminal until reset
    Busted,
}

impl std::fmt::Display for WagerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WagerPhase::Idle => write!(f, "idle"),
            WagerPhase::Flipping => write!(f, "flipping"),
            WagerPhase::Ready => write!(f, "ready"),
            WagerPhase::Busted => write!(f, "busted"),
        }
    }
}

/// A committed flip awaiting resolution.
///
/// Only [`CoinToss::place_bet`] creates these, and settling one consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingFlip {
    id: u64,
    side: CoinSide,
}

impl PendingFlip {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Side the player called
    pub fn side(&self) -> CoinSide {
        self.side
    }
}

/// Result of a resolved flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipOutcome {
    pub called: CoinSide,
    pub landed: CoinSide,
    pub won: bool,
    pub streak: u32,
    pub pot: u64,
}

/// Display snapshot of the wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerState {
    pub bet: u64,
    pub pot: u64,
    pub streak: u32,
    pub is_flipping: bool,
    pub is_busted: bool,
}

#[derive(Debug, Clone)]
pub struct CoinToss {
    bet: u64,
    pot: u64,
    streak: u32,
    phase: WagerPhase,
    called: Option<CoinSide>,
    pending: Option<u64>,
    next_flip: u64,
    delay: Duration,
}

impl CoinToss {
    pub fn new(bet: u64) -> Self {
        Self {
            bet,
            pot: 0,
            streak: 0,
            phase: WagerPhase::Idle,
            called: None,
            pending: None,
            next_flip: 0,
            delay: FLIP_DELAY,
        }
    }

    /// Override the flip animation delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn phase(&self) -> WagerPhase {
        self.phase
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_flipping(&self) -> bool {
        self.phase == WagerPhase::Flipping
    }

    pub fn is_busted(&self) -> bool {
        self.phase == WagerPhase::Busted
    }

    /// Side called on the current or last flip
    pub fn called_side(&self) -> Option<CoinSide> {
        self.called
    }

    pub fn state(&self) -> WagerState {
        WagerState {
            bet: self.bet,
            pot: self.pot,
            streak: self.streak,
            is_flipping: self.is_flipping(),
            is_busted: self.is_busted(),
        }
    }

    /// Change the stake. Only allowed before a streak starts.
    pub fn set_bet(&mut self, amount: u64) -> Result<(), WagerError> {
        if self.phase != WagerPhase::Idle || self.streak > 0 {
            return Err(self.reject("change the bet"));
        }
        if amount == 0 {
            return Err(WagerError::ZeroBet);
        }
        self.bet = amount;
        Ok(())
    }

    /// Commit to a flip and hand it to `scheduler` for resolution.
    ///
    /// From `Idle` this debits the bet and seeds the pot with `bet * 2`;
    /// from `Ready` the current pot rides on the next flip with no debit.
    pub fn place_bet<B, S>(
        &mut self,
        side: CoinSide,
        balance: &mut B,
        scheduler: &mut S,
    ) -> Result<(), WagerError>
    where
        B: BalanceStore + ?Sized,
        S: Scheduler + ?Sized,
    {
        match self.phase {
            WagerPhase::Flipping | WagerPhase::Busted => return Err(self.reject("place a bet")),
            WagerPhase::Idle => {
                if self.bet == 0 {
                    return Err(WagerError::ZeroBet);
                }
                if let Err(e) = balance.try_debit(self.bet) {
                    tracing::debug!(bet = self.bet, available = e.available, "bet rejected");
                    return Err(e.into());
                }
                self.pot = self.bet.saturating_mul(2);
                self.streak = 0;
            }
            WagerPhase::Ready => {}
        }

        let id = self.next_flip;
        self.next_flip += 1;
        self.pending = Some(id);
        self.called = Some(side);
        self.phase = WagerPhase::Flipping;

        tracing::debug!(id, %side, pot = self.pot, streak = self.streak, "flip scheduled");
        scheduler.schedule(self.delay, PendingFlip { id, side });
        Ok(())
    }

    /// Resolve a scheduled flip with a fair coin
    pub fn complete_flip<R: Rng + ?Sized>(
        &mut self,
        flip: PendingFlip,
        rng: &mut R,
    ) -> Result<FlipOutcome, WagerError> {
        self.check_pending(&flip)?;
        let landed = CoinSide::toss(rng);
        self.settle(flip, landed)
    }

    /// Resolve a scheduled flip with a known result
    pub fn settle(&mut self, flip: PendingFlip, landed: CoinSide) -> Result<FlipOutcome, WagerError> {
        self.check_pending(&flip)?;
        self.pending = None;

        let won = landed == flip.side;
        if won {
            self.streak += 1;
            self.pot = self.pot.saturating_mul(2);
            self.phase = WagerPhase::Ready;
        } else {
            self.phase = WagerPhase::Busted;
        }

        tracing::debug!(
            id = flip.id,
            called = %flip.side,
            %landed,
            won,
            pot = self.pot,
            streak = self.streak,
            "flip resolved"
        );

        Ok(FlipOutcome {
            called: flip.side,
            landed,
            won,
            streak: self.streak,
            pot: self.pot,
        })
    }

    /// Bank the pot and end the streak. Returns the amount credited.
    pub fn cash_out<B: BalanceStore + ?Sized>(&mut self, balance: &mut B) -> Result<u64, WagerError> {
        if self.phase != WagerPhase::Ready || self.streak == 0 {
            return Err(self.reject("cash out"));
        }
        let pot = self.pot;
        balance.credit(pot);
        tracing::debug!(pot, streak = self.streak, "cashed out");

        self.pot = 0;
        self.streak = 0;
        self.called = None;
        self.phase = WagerPhase::Idle;
        Ok(pot)
    }

    /// Acknowledge a bust (or clear an idle table). Never touches the balance.
    pub fn reset(&mut self) -> Result<(), WagerError> {
        match self.phase {
            WagerPhase::Busted | WagerPhase::Idle => {
                self.pot = 0;
                self.streak = 0;
                self.called = None;
                self.phase = WagerPhase::Idle;
                Ok(())
            }
            WagerPhase::Flipping | WagerPhase::Ready => Err(self.reject("reset")),
        }
    }

    fn check_pending(&self, flip: &PendingFlip) -> Result<(), WagerError> {
        if self.phase == WagerPhase::Flipping && self.pending == Some(flip.id) {
            Ok(())
        } else {
            tracing::debug!(id = flip.id, pending = ?self.pending, "stale flip rejected");
            Err(WagerError::StaleFlip)
        }
    }

    fn reject(&self, action: &'static str) -> WagerError {
        tracing::debug!(action, phase = %self.phase, "operation rejected");
        if self.phase == WagerPhase::Flipping {
            WagerError::FlipInProgress
        } else {
            WagerError::InvalidState {
                action,
                phase: self.phase,
            }
        }
    }
}

impl Default for CoinToss {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::Wallet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start(balance: u64, bet: u64) -> (CoinToss, Wallet, ManualScheduler) {
        (CoinToss::new(bet), Wallet::new(balance), ManualScheduler::new())
    }

    fn flip(
        toss: &mut CoinToss,
        wallet: &mut Wallet,
        sched: &mut ManualScheduler,
        land: CoinSide,
    ) -> FlipOutcome {
        toss.place_bet(CoinSide::Heads, wallet, sched).unwrap();
        let pending = sched.fire().unwrap();
        toss.settle(pending, land).unwrap()
    }

    #[test]
    fn test_streak_and_cash_out() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);

        toss.place_bet(CoinSide::Heads, &mut wallet, &mut sched).unwrap();
        assert_eq!(wallet.balance(), 900);
        assert_eq!(toss.pot(), 200);
        assert!(toss.is_flipping());
        assert_eq!(sched.next_delay(), Some(FLIP_DELAY));

        let outcome = toss.settle(sched.fire().unwrap(), CoinSide::Heads).unwrap();
        assert!(outcome.won);
        assert_eq!((toss.pot(), toss.streak()), (400, 1));

        let outcome = flip(&mut toss, &mut wallet, &mut sched, CoinSide::Heads);
        assert_eq!((outcome.pot, outcome.streak), (800, 2));
        assert_eq!(wallet.balance(), 900);

        assert_eq!(toss.cash_out(&mut wallet), Ok(800));
        assert_eq!(wallet.balance(), 1700);
        assert_eq!(toss.phase(), WagerPhase::Idle);
        assert_eq!((toss.pot(), toss.streak()), (0, 0));
    }

    #[test]
    fn test_bust_keeps_display_values() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);

        let outcome = flip(&mut toss, &mut wallet, &mut sched, CoinSide::Tails);
        assert!(!outcome.won);
        assert!(toss.is_busted());
        assert_eq!(toss.pot(), 200);
        assert_eq!(wallet.balance(), 900);

        assert!(toss.cash_out(&mut wallet).is_err());
        assert_eq!(wallet.balance(), 900);

        toss.reset().unwrap();
        assert_eq!((toss.pot(), toss.streak()), (0, 0));
        assert!(!toss.is_busted());
        assert_eq!(wallet.balance(), 900);
    }

    #[test]
    fn test_bust_mid_streak() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);
        flip(&mut toss, &mut wallet, &mut sched, CoinSide::Heads);
        flip(&mut toss, &mut wallet, &mut sched, CoinSide::Tails);
        assert!(toss.is_busted());
        assert_eq!((toss.pot(), toss.streak()), (400, 1));
        assert_eq!(wallet.balance(), 900);
    }

    #[test]
    fn test_reentrant_bet_rejected() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);
        toss.place_bet(CoinSide::Heads, &mut wallet, &mut sched).unwrap();

        let before = (toss.streak(), toss.pot(), wallet.balance());
        assert_eq!(
            toss.place_bet(CoinSide::Tails, &mut wallet, &mut sched),
            Err(WagerError::FlipInProgress)
        );
        assert_eq!((toss.streak(), toss.pot(), wallet.balance()), before);
        assert_eq!(sched.len(), 1);
        assert_eq!(toss.called_side(), Some(CoinSide::Heads));
    }

    #[test]
    fn test_insufficient_funds() {
        let (mut toss, mut wallet, mut sched) = start(50, 100);
        let err = toss
            .place_bet(CoinSide::Heads, &mut wallet, &mut sched)
            .unwrap_err();
        assert!(matches!(err, WagerError::InsufficientFunds(_)));
        assert_eq!(toss.phase(), WagerPhase::Idle);
        assert_eq!(wallet.balance(), 50);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_cash_out_requires_streak() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);
        assert!(matches!(
            toss.cash_out(&mut wallet),
            Err(WagerError::InvalidState { .. })
        ));

        toss.place_bet(CoinSide::Heads, &mut wallet, &mut sched).unwrap();
        assert_eq!(toss.cash_out(&mut wallet), Err(WagerError::FlipInProgress));
        assert_eq!(wallet.balance(), 900);
    }

    #[test]
    fn test_stale_flip_rejected() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);
        flip(&mut toss, &mut wallet, &mut sched, CoinSide::Heads);
        toss.place_bet(CoinSide::Heads, &mut wallet, &mut sched).unwrap();

        // a token minted by another table carries an id this one already used
        let mut other = CoinToss::new(100);
        let mut other_wallet = Wallet::new(1000);
        let mut other_sched = ManualScheduler::new();
        other
            .place_bet(CoinSide::Heads, &mut other_wallet, &mut other_sched)
            .unwrap();
        let foreign = other_sched.fire().unwrap();
        assert_eq!(foreign.id(), 0);

        assert_eq!(toss.settle(foreign, CoinSide::Heads), Err(WagerError::StaleFlip));
        assert!(toss.is_flipping());
        assert_eq!((toss.pot(), toss.streak()), (400, 1));

        let outcome = toss.settle(sched.fire().unwrap(), CoinSide::Heads).unwrap();
        assert_eq!((outcome.pot, outcome.streak), (800, 2));
    }

    #[test]
    fn test_bet_locked_during_streak() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);
        assert_eq!(toss.set_bet(0), Err(WagerError::ZeroBet));
        toss.set_bet(250).unwrap();
        flip(&mut toss, &mut wallet, &mut sched, CoinSide::Heads);
        assert!(toss.set_bet(10).is_err());
        assert_eq!(toss.bet(), 250);
        assert_eq!(wallet.balance(), 750);
    }

    #[test]
    fn test_reset_rejected_mid_streak() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);
        flip(&mut toss, &mut wallet, &mut sched, CoinSide::Heads);
        assert!(toss.reset().is_err());
        assert_eq!(toss.pot(), 400);
        toss.cash_out(&mut wallet).unwrap();
        toss.reset().unwrap();
    }

    #[test]
    fn test_fair_coin_conserves_money() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            let (mut toss, mut wallet, mut sched) = start(1000, 100);
            for _ in 0..3 {
                toss.place_bet(CoinSide::Tails, &mut wallet, &mut sched).unwrap();
                let pending = sched.fire().unwrap();
                if !toss.complete_flip(pending, &mut rng).unwrap().won {
                    break;
                }
            }
            let cashed = if toss.phase() == WagerPhase::Ready {
                toss.cash_out(&mut wallet).unwrap()
            } else {
                0
            };
            assert_eq!(wallet.balance(), 1000 - 100 + cashed);
        }
    }

    #[test]
    fn test_coin_side_parse() {
        assert_eq!("Heads".parse::<CoinSide>(), Ok(CoinSide::Heads));
        assert_eq!("t".parse::<CoinSide>(), Ok(CoinSide::Tails));
        assert!("edge".parse::<CoinSide>().is_err());
        assert_eq!(CoinSide::Heads.opposite(), CoinSide::Tails);
    }

    #[test]
    fn test_state_snapshot() {
        let (mut toss, mut wallet, mut sched) = start(1000, 100);
        toss.place_bet(CoinSide::Heads, &mut wallet, &mut sched).unwrap();
        let state = toss.state();
        assert!(state.is_flipping);
        assert!(!state.is_busted);
        assert_eq!(state.pot, 200);
    }

    #[test]
    fn test_custom_flip_delay_is_scheduled() {
        let mut toss = CoinToss::new(100).with_delay(Duration::from_millis(250));
        let mut wallet = Wallet::new(1000);
        let mut sched = ManualScheduler::new();

        assert_eq!(toss.delay(), Duration::from_millis(250));
        toss.place_bet(CoinSide::Heads, &mut wallet, &mut sched).unwrap();
        assert_eq!(sched.next_delay(), Some(Duration::from_millis(250)));
    }
}
