use js_sys::Function;
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod deck;
pub mod hand;
pub mod logger;
pub mod outcome;
pub mod round;
pub mod sim;
pub mod snapshot;
pub mod table;

pub use deck::{DeckSource, RandomDeck, Rank, ScriptedDeck, RANK_VALUES};
pub use hand::{score, Hand, Score};
pub use outcome::{resolve, Outcome};
pub use round::{Action, Phase, Round, RoundError, Side};
pub use snapshot::{CardView, Snapshot};
pub use table::{TableConfig, TableView};

/// Offset so card faces do not mirror the rank stream of a seeded table.
const DECORATION_SEED_SALT: u64 = 0x5eed_cafe;

/// Maps (autoplay tallies) must reach JS as plain objects, like the structs.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

fn round_err(err: RoundError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One browser table. Every command returns the view to render; automatic
/// steps are driven by the page calling `advance` after `nextStepDelayMs`.
#[wasm_bindgen]
pub struct BlackjackTable {
    round: Round<RandomDeck>,
    config: TableConfig,
    decoration_rng: SmallRng,
    listener: Option<Function>,
}

#[wasm_bindgen]
impl BlackjackTable {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue) -> Result<BlackjackTable, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = if config.is_undefined() || config.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config.clone())
                .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?
        };
        logger::init(config.level_filter());

        let (deck, decoration_rng) = match config.seed {
            Some(seed) => (
                RandomDeck::new(seed),
                SmallRng::seed_from_u64(seed ^ DECORATION_SEED_SALT),
            ),
            None => (RandomDeck::from_entropy(), SmallRng::from_entropy()),
        };
        log::debug!("table ready, seeded: {}", config.seed.is_some());

        Ok(BlackjackTable {
            round: Round::new(deck),
            config,
            decoration_rng,
            listener: None,
        })
    }

    #[wasm_bindgen(js_name = startRound)]
    pub fn start_round(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self.round.start_round().map_err(round_err)?;
        self.publish(snapshot)
    }

    pub fn hit(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self.round.hit().map_err(round_err)?;
        self.publish(snapshot)
    }

    pub fn stand(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self.round.stand().map_err(round_err)?;
        self.publish(snapshot)
    }

    /// Runs the next automatic step for `generation`. Returns `null` when the
    /// continuation belongs to a round that has since been replaced.
    pub fn advance(&mut self, generation: u32) -> Result<JsValue, JsValue> {
        match self.round.advance_if_current(generation).map_err(round_err)? {
            Some(snapshot) => self.publish(snapshot),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self.round.reset();
        self.publish(snapshot)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&TableView::new(self.round.snapshot(), &self.config))
    }

    /// Registers a callback invoked with every new view.
    pub fn subscribe(&mut self, callback: Function) {
        self.listener = Some(callback);
    }

    pub fn unsubscribe(&mut self) {
        self.listener = None;
    }

    #[wasm_bindgen(js_name = decorateCard)]
    pub fn decorate_card(&mut self, rank: u8) -> Result<JsValue, JsValue> {
        let face = table::decorate(rank, &mut self.decoration_rng)
            .ok_or_else(|| JsValue::from_str(&format!("No card face for rank {rank}")))?;
        to_js(&face)
    }

    pub fn pacing(&self) -> Result<JsValue, JsValue> {
        to_js(&self.config.pacing())
    }
}

impl BlackjackTable {
    fn publish(&self, snapshot: Snapshot) -> Result<JsValue, JsValue> {
        let view = to_js(&TableView::new(snapshot, &self.config))?;
        if let Some(listener) = &self.listener {
            if let Err(err) = listener.call1(&JsValue::NULL, &view) {
                log::warn!("table listener threw: {err:?}");
            }
        }
        Ok(view)
    }
}

#[wasm_bindgen(js_name = runAutoplay)]
pub fn run_autoplay(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::AutoplayInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let result = sim::run(input)
        .map_err(|err| JsValue::from_str(&format!("Autoplay failed: {err}")))?;

    to_js(&result)
}

#[wasm_bindgen(js_name = runAutoplayWithProgress)]
pub fn run_autoplay_with_progress(
    params: &JsValue,
    progress_callback: &Function,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::AutoplayInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let mut progress_cb = |current: u32, total: u32| {
        if let Err(err) = progress_callback.call2(
            &JsValue::NULL,
            &JsValue::from(current),
            &JsValue::from(total),
        ) {
            log::warn!("autoplay progress callback threw: {err:?}");
        }
    };

    let result = sim::run_with_progress(input, &mut progress_cb)
        .map_err(|err| JsValue::from_str(&format!("Autoplay failed: {err}")))?;

    to_js(&result)
}
