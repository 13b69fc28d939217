use crate::types::{CarRecord, ColumnConfig, Record, VariantRecord};
use crate::{log_error, log_info, log_warn};
use std::collections::HashMap;

/// The two tabular sources the catalog is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cars,
    Variants,
}

impl Source {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cars" => Some(Source::Cars),
            "variants" | "car_variants" => Some(Source::Variants),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Source::Cars => "cars",
            Source::Variants => "variants",
        }
    }
}

/// Load state of one source
#[derive(Debug, Clone)]
enum Slot {
    Pending,
    Loaded(Vec<Record>),
    Failed(String),
}

/// Whether the store can answer queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Ready,
    Failed(String),
}

/// Loaded, joined cars. Read-only once built.
#[derive(Debug, Clone)]
pub struct RecordStore {
    cars: Vec<CarRecord>,
    orphan_variants: usize,
    status: LoadStatus,
}

impl RecordStore {
    /// Store that has not received its data yet
    pub fn pending() -> Self {
        RecordStore {
            cars: vec![],
            orphan_variants: 0,
            status: LoadStatus::Pending,
        }
    }

    /// Store whose load failed for good
    pub fn failed(reason: impl Into<String>) -> Self {
        RecordStore {
            cars: vec![],
            orphan_variants: 0,
            status: LoadStatus::Failed(reason.into()),
        }
    }

    /// Build the store from parsed rows: drop nameless cars, then attach each
    /// car's variants in source order.
    pub fn load(car_rows: &[Record], variant_rows: &[Record], columns: &ColumnConfig) -> Self {
        let mut cars: Vec<CarRecord> = car_rows
            .iter()
            .filter_map(|row| car_from_row(row, columns))
            .collect();

        // car name -> variants, in source order
        let mut variants: HashMap<&str, Vec<VariantRecord>> = HashMap::new();
        for row in variant_rows {
            let car_name = field(row, &columns.variant_car_name);
            if car_name.is_empty() {
                continue;
            }
            variants
                .entry(car_name)
                .or_default()
                .push(VariantRecord {
                    name: field(row, &columns.variant_name).to_string(),
                    price: field(row, &columns.variant_price).to_string(),
                });
        }

        let mut joined = 0usize;
        for car in &mut cars {
            // duplicate car names share the same variant list
            if let Some(list) = variants.get(car.name.as_str()) {
                car.variants = list.clone();
                joined += list.len();
            }
        }

        let orphan_variants = variants
            .iter()
            .filter(|(name, _)| !cars.iter().any(|car| car.name == **name))
            .map(|(_, list)| list.len())
            .sum::<usize>();
        if orphan_variants > 0 {
            log_warn!("{} variant rows reference no loaded car", orphan_variants);
        }
        log_info!(
            "Loaded {} cars ({} skipped), {} variants joined",
            cars.len(),
            car_rows.len() - cars.len(),
            joined
        );

        RecordStore {
            cars,
            orphan_variants,
            status: LoadStatus::Ready,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// True when loaded with at least one car
    pub fn is_available(&self) -> bool {
        self.status == LoadStatus::Ready && !self.cars.is_empty()
    }

    /// Variant rows dropped from the join because no car carries their name
    pub fn orphan_variants(&self) -> usize {
        self.orphan_variants
    }

    /// Cars in source order
    pub fn cars(&self) -> &[CarRecord] {
        &self.cars
    }

    /// Case-insensitive exact lookup by car name; first match in source order
    pub fn lookup(&self, car_name: &str) -> Option<&CarRecord> {
        let wanted = car_name.to_lowercase();
        self.cars.iter().find(|car| car.name.to_lowercase() == wanted)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::pending()
    }
}

fn field<'r>(row: &'r Record, column: &str) -> &'r str {
    row.get(column).map(String::as_str).unwrap_or("")
}

fn car_from_row(row: &Record, columns: &ColumnConfig) -> Option<CarRecord> {
    let name = field(row, &columns.car_name);
    if name.is_empty() {
        return None;
    }
    Some(CarRecord {
        name: name.to_string(),
        price: field(row, &columns.price).to_string(),
        drive_type: field(row, &columns.drive_type).to_string(),
        fuel_tank_capacity: field(row, &columns.fuel_tank_capacity).to_string(),
        fuel_type: field(row, &columns.fuel_type).to_string(),
        mileage: field(row, &columns.mileage).to_string(),
        torque: field(row, &columns.torque).to_string(),
        image: field(row, &columns.image).to_string(),
        variants: vec![],
    })
}

/// Collects both sources as they arrive and builds the store once every
/// required source is in. A failed required source is permanent.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    columns: ColumnConfig,
    require_variants: bool,
    cars: Slot,
    variants: Slot,
}

impl CatalogLoader {
    pub fn new(columns: ColumnConfig, require_variants: bool) -> Self {
        CatalogLoader {
            columns,
            require_variants,
            cars: Slot::Pending,
            variants: Slot::Pending,
        }
    }

    fn slot_mut(&mut self, source: Source) -> &mut Slot {
        match source {
            Source::Cars => &mut self.cars,
            Source::Variants => &mut self.variants,
        }
    }

    /// Hand over the parsed rows of one source
    pub fn receive(&mut self, source: Source, rows: Vec<Record>) {
        log_info!("Received {} rows from {}", rows.len(), source.name());
        let slot = self.slot_mut(source);
        if let Slot::Failed(reason) = slot {
            log_warn!("Ignoring {} rows after failure: {}", source.name(), reason);
            return;
        }
        *slot = Slot::Loaded(rows);
    }

    /// Mark one source as failed
    pub fn fail(&mut self, source: Source, reason: impl Into<String>) {
        let reason = reason.into();
        log_error!("Error loading {} data: {}", source.name(), reason);
        *self.slot_mut(source) = Slot::Failed(reason);
    }

    pub fn status(&self) -> LoadStatus {
        if let Slot::Failed(reason) = &self.cars {
            return LoadStatus::Failed(format!("cars: {reason}"));
        }
        if self.require_variants {
            if let Slot::Failed(reason) = &self.variants {
                return LoadStatus::Failed(format!("variants: {reason}"));
            }
        }
        let cars_in = matches!(self.cars, Slot::Loaded(_));
        let variants_in = !self.require_variants || matches!(self.variants, Slot::Loaded(_));
        if cars_in && variants_in {
            LoadStatus::Ready
        } else {
            LoadStatus::Pending
        }
    }

    /// Current store: joined when ready, otherwise a "no data" store
    pub fn build(&self) -> RecordStore {
        match self.status() {
            LoadStatus::Pending => RecordStore::pending(),
            LoadStatus::Failed(reason) => RecordStore::failed(reason),
            LoadStatus::Ready => {
                let cars = match &self.cars {
                    Slot::Loaded(rows) => rows.as_slice(),
                    _ => &[],
                };
                let variants = match &self.variants {
                    Slot::Loaded(rows) => rows.as_slice(),
                    _ => &[],
                };
                RecordStore::load(cars, variants, &self.columns)
            }
        }
    }
}
