//! WebAssembly bindings for trove
//!
//! JavaScript-friendly wrappers around the minigames and the collection
//! helpers. The page keeps ownership of the player's balance and hands in a
//! getter/setter pair; structured results come back as JSON strings.

use crate::balance::BalanceStore;
use crate::catalog::{Catalog, Category, ResourceStack};
use crate::collection::{
    compute_completion, counts, discovered_phrases, discovered_resources, group, CollectedItem,
};
use crate::reference::{odds_display, VariantId};
use crate::slots::{GachaTerminal as RustTerminal, TerminalRules};
use crate::wager::{CoinSide, CoinToss as RustCoinToss, PendingFlip, Scheduler};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;
use wasm_bindgen::prelude::*;

fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err("Serialize failed", e))
}

/// Balance owned by the page, reached through two callbacks.
///
/// A failing or non-numeric getter reads as zero so nothing can be spent
/// against an unknown balance.
pub struct JsBalance {
    getter: js_sys::Function,
    setter: js_sys::Function,
}

impl JsBalance {
    pub fn new(getter: js_sys::Function, setter: js_sys::Function) -> Self {
        Self { getter, setter }
    }
}

impl BalanceStore for JsBalance {
    fn balance(&self) -> u64 {
        match self.getter.call0(&JsValue::NULL).map(|v| v.as_f64()) {
            Ok(Some(v)) if v.is_finite() && v > 0.0 => v as u64,
            _ => 0,
        }
    }

    fn set_balance(&mut self, value: u64) {
        if let Err(e) = self
            .setter
            .call1(&JsValue::NULL, &JsValue::from_f64(value as f64))
        {
            tracing::warn!(?e, value, "balance setter threw");
        }
    }
}

/// Holds the single pending flip until the page's timer fires
#[derive(Default)]
struct HeldFlip(Option<(Duration, PendingFlip)>);

impl Scheduler for HeldFlip {
    fn schedule(&mut self, delay: Duration, flip: PendingFlip) {
        self.0 = Some((delay, flip));
    }
}

/// Double-or-nothing coin toss
#[wasm_bindgen]
pub struct CoinToss {
    inner: RustCoinToss,
    held: HeldFlip,
    balance: JsBalance,
}

#[wasm_bindgen]
impl CoinToss {
    #[wasm_bindgen(constructor)]
    pub fn new(bet: f64, get_balance: js_sys::Function, set_balance: js_sys::Function) -> CoinToss {
        CoinToss {
            inner: RustCoinToss::new(bet as u64),
            held: HeldFlip::default(),
            balance: JsBalance::new(get_balance, set_balance),
        }
    }

    /// Commit to a flip. Returns how many milliseconds to wait before
    /// calling `completeFlip`.
    #[wasm_bindgen(js_name = placeBet)]
    pub fn place_bet(&mut self, side: &str) -> Result<f64, JsValue> {
        let side: CoinSide = side.parse().map_err(|e| js_err("Bet failed", e))?;
        self.inner
            .place_bet(side, &mut self.balance, &mut self.held)
            .map_err(|e| js_err("Bet failed", e))?;
        Ok(self
            .held
            .0
            .as_ref()
            .map(|(delay, _)| delay.as_millis() as f64)
            .unwrap_or(0.0))
    }

    /// Resolve the pending flip. Returns the outcome as JSON.
    #[wasm_bindgen(js_name = completeFlip)]
    pub fn complete_flip(&mut self) -> Result<String, JsValue> {
        let (_, flip) = self
            .held
            .0
            .take()
            .ok_or_else(|| JsValue::from_str("No flip pending"))?;
        let outcome = self
            .inner
            .complete_flip(flip, &mut rand::thread_rng())
            .map_err(|e| js_err("Flip failed", e))?;
        to_json(&outcome)
    }

    #[wasm_bindgen(js_name = cashOut)]
    pub fn cash_out(&mut self) -> Result<f64, JsValue> {
        self.inner
            .cash_out(&mut self.balance)
            .map(|pot| pot as f64)
            .map_err(|e| js_err("Cash out failed", e))
    }

    #[wasm_bindgen(js_name = reset)]
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.inner.reset().map_err(|e| js_err("Reset failed", e))
    }

    #[wasm_bindgen(js_name = setBet)]
    pub fn set_bet(&mut self, amount: f64) -> Result<(), JsValue> {
        self.inner
            .set_bet(amount as u64)
            .map_err(|e| js_err("Set bet failed", e))
    }

    /// `{ bet, pot, streak, isFlipping, isBusted }` as JSON
    #[wasm_bindgen(js_name = state)]
    pub fn state(&self) -> Result<String, JsValue> {
        to_json(&self.inner.state())
    }

    #[wasm_bindgen(js_name = isFlipping)]
    pub fn is_flipping(&self) -> bool {
        self.inner.is_flipping()
    }
}

/// Spin result as sent to the page
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpinView {
    glyphs: Vec<&'static str>,
    codes: Vec<&'static str>,
    stops_ms: Vec<f64>,
    result: String,
    payout: f64,
}

/// Slot-machine gacha terminal over the built-in symbol table
#[wasm_bindgen]
pub struct GachaTerminal {
    inner: RustTerminal<'static>,
    balance: JsBalance,
}

#[wasm_bindgen]
impl GachaTerminal {
    #[wasm_bindgen(constructor)]
    pub fn new(get_balance: js_sys::Function, set_balance: js_sys::Function) -> GachaTerminal {
        GachaTerminal {
            inner: RustTerminal::new(TerminalRules::default()),
            balance: JsBalance::new(get_balance, set_balance),
        }
    }

    #[wasm_bindgen(js_name = buyCredits)]
    pub fn buy_credits(&mut self, count: u32) -> Result<u32, JsValue> {
        self.inner
            .buy_credits(count, &mut self.balance)
            .map_err(|e| js_err("Purchase failed", e))
    }

    #[wasm_bindgen(js_name = credits)]
    pub fn credits(&self) -> u32 {
        self.inner.credits()
    }

    /// Spin once. Returns `{ glyphs, codes, stopsMs, result, payout }` as JSON.
    #[wasm_bindgen(js_name = spin)]
    pub fn spin(&mut self) -> Result<String, JsValue> {
        let outcome = self
            .inner
            .spin(&mut rand::thread_rng(), &mut self.balance)
            .map_err(|e| js_err("Spin failed", e))?;
        to_json(&SpinView {
            glyphs: outcome.symbols().iter().map(|s| s.glyph).collect(),
            codes: outcome.symbols().iter().map(|s| s.code).collect(),
            stops_ms: outcome
                .stops
                .iter()
                .map(|s| s.delay.as_millis() as f64)
                .collect(),
            result: outcome.result.to_string(),
            payout: outcome.payout as f64,
        })
    }

    /// Throw-away glyphs for the spinning animation
    #[wasm_bindgen(js_name = decoyFrame)]
    pub fn decoy_frame(&self) -> js_sys::Array {
        let arr = js_sys::Array::new();
        if let Some(symbols) = self.inner.decoy_frame(&mut rand::thread_rng()) {
            for symbol in symbols {
                arr.push(&JsValue::from_str(symbol.glyph));
            }
        }
        arr
    }
}

/// Format odds, e.g. `formatProbability(1500000, 1)` → "1 in 1.5M"
#[wasm_bindgen(js_name = formatProbability)]
pub fn format_probability(base: f64, multiplier: f64) -> String {
    crate::collection::format_probability(base, multiplier)
}

/// Odds for a rarity tier and variant from the built-in tables
#[wasm_bindgen(js_name = oddsDisplay)]
pub fn odds_for(rarity: u8, variant: u8) -> Option<String> {
    odds_display(rarity, VariantId(variant))
}

#[derive(Serialize)]
struct GroupedView<'a> {
    groups: BTreeMap<String, Vec<&'a CollectedItem>>,
    counts: BTreeMap<String, usize>,
}

/// Group a JSON array of collected items by variant code, in display order
#[wasm_bindgen(js_name = groupItems)]
pub fn group_items(items_json: &str) -> Result<String, JsValue> {
    let items: Vec<CollectedItem> =
        serde_json::from_str(items_json).map_err(|e| js_err("Parse failed", e))?;
    let view = GroupedView {
        groups: group(&items)
            .into_iter()
            .map(|(variant, members)| (variant.to_string(), members))
            .collect(),
        counts: counts(&items)
            .into_iter()
            .map(|(variant, n)| (variant.to_string(), n))
            .collect(),
    };
    to_json(&view)
}

/// Completion percentage for arbitrary string ids: `discovered` and
/// `catalog` are JSON arrays of strings
#[wasm_bindgen(js_name = computeCompletion)]
pub fn completion(discovered_json: &str, catalog_json: &str) -> Result<u8, JsValue> {
    let discovered: HashSet<String> =
        serde_json::from_str(discovered_json).map_err(|e| js_err("Parse failed", e))?;
    let catalog: Vec<String> =
        serde_json::from_str(catalog_json).map_err(|e| js_err("Parse failed", e))?;
    Ok(compute_completion(&discovered, &catalog))
}

fn builtin_catalog() -> Result<Catalog, JsValue> {
    Catalog::builtin().map_err(|e| js_err("Catalog failed", e))
}

/// Phrase completion percentage against the built-in catalog
#[wasm_bindgen(js_name = phraseCompletion)]
pub fn phrase_completion(items_json: &str) -> Result<u8, JsValue> {
    let items: Vec<CollectedItem> =
        serde_json::from_str(items_json).map_err(|e| js_err("Parse failed", e))?;
    let keys = builtin_catalog()?.phrase_keys();
    let discovered: HashSet<_> = discovered_phrases(&items)
        .into_iter()
        .filter(|k| keys.contains(k))
        .collect();
    Ok(compute_completion(&discovered, &keys))
}

/// Resource completion percentage for one category
#[wasm_bindgen(js_name = resourceCompletion)]
pub fn resource_completion(stacks_json: &str, category: &str) -> Result<u8, JsValue> {
    let category: Category = category.parse().map_err(|e| js_err("Bad category", e))?;
    let stacks: Vec<ResourceStack> =
        serde_json::from_str(stacks_json).map_err(|e| js_err("Parse failed", e))?;
    let catalog = builtin_catalog()?;
    let ids = catalog.resource_ids(category);
    let discovered: HashSet<u32> = discovered_resources(&stacks, category)
        .into_iter()
        .filter(|id| ids.contains(id))
        .collect();
    Ok(compute_completion(&discovered, &ids))
}
