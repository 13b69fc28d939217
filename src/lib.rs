use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod detail;
pub mod error;
pub mod log;
pub mod navigation;
pub mod navigator;
pub mod parse;
pub mod search;
pub mod store;
pub mod types;

use crate::detail::{DetailAssembler, DetailView};
use crate::error::{CatalogError, Result};
use crate::navigator::{Key, NavEvent, SuggestionNavigator};
use crate::search::Matcher;
use crate::store::{CatalogLoader, LoadStatus, RecordStore, Source};
use types::{CatalogConfig, MatchResult, Record, SuggestionOutcome};

/// Suggestion picked from the list: where to go next
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSelection {
    pub car_name: String,
    pub url: String,
}

/// Page state: loaded data plus what the user is looking at
struct Catalog {
    config: CatalogConfig,
    loader: CatalogLoader,
    store: RecordStore,
    matcher: Matcher,
    navigator: SuggestionNavigator<MatchResult>,
    detail: Option<DetailView>,
}

impl Catalog {
    fn new(config: CatalogConfig) -> Self {
        Catalog {
            loader: CatalogLoader::new(config.columns.clone(), config.require_variants),
            store: RecordStore::pending(),
            matcher: Matcher::new(config.matcher.clone()),
            navigator: SuggestionNavigator::new(),
            detail: None,
            config,
        }
    }

    fn receive(&mut self, source: Source, rows: Vec<Record>) {
        self.loader.receive(source, rows);
        self.refresh_store();
    }

    fn fail(&mut self, source: Source, reason: &str) {
        self.loader.fail(source, reason);
        self.refresh_store();
    }

    /// Rebuild once the barrier opens; a ready or failed store is final
    fn refresh_store(&mut self) {
        if *self.store.status() == LoadStatus::Pending {
            self.store = self.loader.build();
        }
    }

    fn search(&mut self, query: &str) -> SuggestionOutcome {
        let outcome = self.matcher.query(&self.store, query);
        self.navigator.replace(outcome.matches().to_vec());
        outcome
    }

    fn handle_key(&mut self, key: Key) -> NavEvent<CarSelection> {
        match self.navigator.handle_key(key) {
            NavEvent::Select { index, item } => {
                let selection = self.selection_for(&item.display_text);
                NavEvent::Select {
                    index,
                    item: selection,
                }
            }
            NavEvent::Highlight { index } => NavEvent::Highlight { index },
            NavEvent::Dismissed => NavEvent::Dismissed,
            NavEvent::Ignored => NavEvent::Ignored,
        }
    }

    fn selection_for(&self, car_name: &str) -> CarSelection {
        CarSelection {
            car_name: car_name.to_string(),
            url: navigation::car_page_url(&self.config.detail_page, car_name),
        }
    }

    fn open_detail(&mut self, car_name: &str) -> &DetailView {
        let view = DetailAssembler::new(&self.store).assemble(car_name);
        self.detail.insert(view)
    }
}

thread_local! {
    static CATALOG: RefCell<Option<Catalog>> = const { RefCell::new(None) };
}

fn with_catalog<T>(f: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
    CATALOG.with(|catalog| match catalog.borrow_mut().as_mut() {
        Some(catalog) => f(catalog),
        None => Err(CatalogError::NotInitialized),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn source_from_name(name: &str) -> Result<Source> {
    Source::from_name(name).ok_or_else(|| CatalogError::SourceUnavailable {
        table: name.to_string(),
        reason: "unknown data source".to_string(),
    })
}

fn init_catalog_inner(config_json: &str) -> Result<()> {
    let config: CatalogConfig = if config_json.trim().is_empty() {
        CatalogConfig::default()
    } else {
        serde_json::from_str(config_json)?
    };
    log_info!(
        "Catalog initialized (min_query_length={}, max_results={}, require_variants={})",
        config.matcher.min_query_length,
        config.matcher.max_results,
        config.require_variants
    );
    CATALOG.with(|catalog| *catalog.borrow_mut() = Some(Catalog::new(config)));
    Ok(())
}

fn load_rows_inner(source: Source, rows_json: &str) -> Result<()> {
    with_catalog(|catalog| {
        match serde_json::from_str::<Vec<Record>>(rows_json) {
            Ok(rows) => catalog.receive(source, rows),
            Err(e) => {
                // unparseable data is as good as no data
                catalog.fail(source, &e.to_string());
                return Err(e.into());
            }
        }
        Ok(())
    })
}

fn report_load_error_inner(source: &str, message: &str) -> Result<()> {
    let source = source_from_name(source)?;
    with_catalog(|catalog| {
        catalog.fail(source, message);
        Ok(())
    })
}

fn search_cars_inner(query: &str) -> Result<String> {
    with_catalog(|catalog| to_json(&catalog.search(query)))
}

fn handle_key_inner(key: &str) -> Result<String> {
    with_catalog(|catalog| to_json(&catalog.handle_key(Key::from_name(key))))
}

fn select_suggestion_inner(index: usize) -> Result<String> {
    with_catalog(|catalog| {
        let name = catalog
            .navigator
            .items()
            .get(index)
            .map(|item| item.display_text.clone())
            .ok_or_else(|| CatalogError::NotFound(format!("suggestion #{index}")))?;
        to_json(&catalog.selection_for(&name))
    })
}

fn car_details_inner(car_name: &str) -> Result<String> {
    with_catalog(|catalog| to_json(catalog.open_detail(car_name)))
}

fn car_details_from_url_inner(search: &str) -> Result<String> {
    let car_name = navigation::car_param(search).unwrap_or_else(|e| {
        log_warn!("{}", e);
        None
    });
    with_catalog(|catalog| match car_name {
        Some(name) if !name.is_empty() => to_json(catalog.open_detail(&name)),
        // no usable parameter: nothing to look up
        _ => {
            let view = if catalog.store.is_available() {
                DetailView::not_found()
            } else {
                DetailView::unavailable()
            };
            to_json(&*catalog.detail.insert(view))
        }
    })
}

fn select_variant_inner(index: usize) -> Result<String> {
    with_catalog(|catalog| {
        let view = catalog
            .detail
            .as_mut()
            .ok_or_else(|| CatalogError::NotFound("open car page".to_string()))?;
        if !view.select_variant(index) {
            log_warn!("No variant #{} on this page", index);
        }
        to_json(&*view)
    })
}

fn select_variant_by_name_inner(name: &str) -> Result<String> {
    with_catalog(|catalog| {
        let view = catalog
            .detail
            .as_mut()
            .ok_or_else(|| CatalogError::NotFound("open car page".to_string()))?;
        if !view.select_variant_named(name) {
            log_warn!("No variant '{}' on this page", name);
        }
        to_json(&*view)
    })
}

fn clear_variant_inner() -> Result<String> {
    with_catalog(|catalog| {
        let view = catalog
            .detail
            .as_mut()
            .ok_or_else(|| CatalogError::NotFound("open car page".to_string()))?;
        view.clear_selection();
        to_json(&*view)
    })
}

fn js_err(e: CatalogError) -> JsError {
    JsError::new(&e.to_string())
}

/// Initialize the catalog with a JSON config (empty string or "{}" for defaults)
#[wasm_bindgen]
pub fn init_catalog(config_json: &str) -> Result<(), JsError> {
    init_catalog_inner(config_json).map_err(js_err)
}

/// Feed parsed car rows: JSON array of {column: value} objects
#[wasm_bindgen]
pub fn load_cars(rows_json: &str) -> Result<(), JsError> {
    load_rows_inner(Source::Cars, rows_json).map_err(js_err)
}

/// Feed parsed variant rows: JSON array of {column: value} objects
#[wasm_bindgen]
pub fn load_variants(rows_json: &str) -> Result<(), JsError> {
    load_rows_inner(Source::Variants, rows_json).map_err(js_err)
}

/// Report that a source ("cars" or "variants") could not be loaded
#[wasm_bindgen]
pub fn report_load_error(source: &str, message: &str) -> Result<(), JsError> {
    report_load_error_inner(source, message).map_err(js_err)
}

/// Check if every required source has been loaded, joined, and holds cars
#[wasm_bindgen]
pub fn is_catalog_ready() -> bool {
    CATALOG.with(|catalog| {
        catalog
            .borrow()
            .as_ref()
            .is_some_and(|c| c.store.is_available())
    })
}

/// Number of loaded cars
#[wasm_bindgen]
pub fn car_count() -> usize {
    CATALOG.with(|catalog| catalog.borrow().as_ref().map_or(0, |c| c.store.cars().len()))
}

/// Run a query and return the suggestion state as JSON
#[wasm_bindgen]
pub fn search_cars(query: &str) -> Result<String, JsError> {
    search_cars_inner(query).map_err(js_err)
}

/// Apply a keydown (`KeyboardEvent.key`) to the suggestion list
#[wasm_bindgen]
pub fn handle_key(key: &str) -> Result<String, JsError> {
    handle_key_inner(key).map_err(js_err)
}

/// Current highlighted suggestion, -1 for none
#[wasm_bindgen]
pub fn highlight_index() -> isize {
    CATALOG.with(|catalog| {
        catalog
            .borrow()
            .as_ref()
            .map_or(-1, |c| c.navigator.highlight_index())
    })
}

/// Selection for a clicked suggestion
#[wasm_bindgen]
pub fn select_suggestion(index: usize) -> Result<String, JsError> {
    select_suggestion_inner(index).map_err(js_err)
}

/// Close the suggestion list (click outside, cleared input)
#[wasm_bindgen]
pub fn dismiss_suggestions() {
    CATALOG.with(|catalog| {
        if let Some(c) = catalog.borrow_mut().as_mut() {
            c.navigator.dismiss();
        }
    });
}

/// Detail view model for a decoded car name
#[wasm_bindgen]
pub fn car_details(car_name: &str) -> Result<String, JsError> {
    car_details_inner(car_name).map_err(js_err)
}

/// Detail view model for the car named in `location.search`
#[wasm_bindgen]
pub fn car_details_from_url(search: &str) -> Result<String, JsError> {
    car_details_from_url_inner(search).map_err(js_err)
}

/// Show a variant's price on the current detail page
#[wasm_bindgen]
pub fn select_variant(index: usize) -> Result<String, JsError> {
    select_variant_inner(index).map_err(js_err)
}

/// Show the price of the variant called `name` on the current detail page
#[wasm_bindgen]
pub fn select_variant_by_name(name: &str) -> Result<String, JsError> {
    select_variant_by_name_inner(name).map_err(js_err)
}

/// Restore the car's own price on the current detail page
#[wasm_bindgen]
pub fn clear_variant() -> Result<String, JsError> {
    clear_variant_inner().map_err(js_err)
}

/// Detail page URL for a car name
#[wasm_bindgen]
pub fn car_page_url(car_name: &str) -> String {
    CATALOG.with(|catalog| {
        let page = catalog
            .borrow()
            .as_ref()
            .map(|c| c.config.detail_page.clone())
            .unwrap_or_else(|| CatalogConfig::default().detail_page);
        navigation::car_page_url(&page, car_name)
    })
}
