use crate::store::RecordStore;
use crate::types::{CarRecord, VariantRecord};
use serde::Serialize;

/// Fields shown on the car page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetail {
    pub name: String,
    /// Displayed price: the car's own price until a variant is picked
    pub price: String,
    pub base_price: String,
    pub drive_type: String,
    pub fuel_tank_capacity: String,
    pub fuel_type: String,
    pub mileage: String,
    pub torque: String,
    pub image_ref: String,
    pub variants: Vec<VariantRecord>,
    pub selected_variant: Option<usize>,
}

impl CarDetail {
    fn from_car(car: &CarRecord) -> Self {
        CarDetail {
            name: car.name.clone(),
            price: car.price.clone(),
            base_price: car.price.clone(),
            drive_type: car.drive_type.clone(),
            fuel_tank_capacity: car.fuel_tank_capacity.clone(),
            fuel_type: car.fuel_type.clone(),
            mileage: car.mileage.clone(),
            torque: car.torque.clone(),
            image_ref: car.image.clone(),
            variants: car.variants.clone(),
            selected_variant: None,
        }
    }
}

/// Car page view model. `car` is set only when `not_found` and
/// `unavailable` are both false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    #[serde(flatten)]
    car: Option<CarDetail>,
    not_found: bool,
    unavailable: bool,
}

impl DetailView {
    pub fn found(car: &CarRecord) -> Self {
        DetailView {
            car: Some(CarDetail::from_car(car)),
            not_found: false,
            unavailable: false,
        }
    }

    pub fn not_found() -> Self {
        DetailView {
            car: None,
            not_found: true,
            unavailable: false,
        }
    }

    /// Data never loaded: "No car data found"
    pub fn unavailable() -> Self {
        DetailView {
            car: None,
            not_found: false,
            unavailable: true,
        }
    }

    pub fn car(&self) -> Option<&CarDetail> {
        self.car.as_ref()
    }

    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    /// Show the price of the variant at `index`. The store is untouched.
    /// Returns false (and changes nothing) when there is no such variant.
    pub fn select_variant(&mut self, index: usize) -> bool {
        let Some(car) = self.car.as_mut() else {
            return false;
        };
        let Some(variant) = car.variants.get(index) else {
            return false;
        };
        car.price = variant.price.clone();
        car.selected_variant = Some(index);
        true
    }

    /// Select the first variant called `name`
    pub fn select_variant_named(&mut self, name: &str) -> bool {
        let index = self
            .car
            .as_ref()
            .and_then(|car| car.variants.iter().position(|v| v.name == name));
        match index {
            Some(index) => self.select_variant(index),
            None => false,
        }
    }

    /// Back to the car's own price
    pub fn clear_selection(&mut self) {
        if let Some(car) = self.car.as_mut() {
            car.price = car.base_price.clone();
            car.selected_variant = None;
        }
    }
}

/// Builds car pages from the store
pub struct DetailAssembler<'a> {
    store: &'a RecordStore,
}

impl<'a> DetailAssembler<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        DetailAssembler { store }
    }

    /// `car_name` is the already-decoded URL parameter
    pub fn assemble(&self, car_name: &str) -> DetailView {
        if !self.store.is_available() {
            return DetailView::unavailable();
        }
        match self.store.lookup(car_name) {
            Some(car) => DetailView::found(car),
            None => DetailView::not_found(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{car_row, variant_row};
    use crate::types::ColumnConfig;

    fn sample_store() -> RecordStore {
        let cars = vec![car_row("Model A", "9,500"), car_row("Model B", "8,000")];
        let variants = vec![
            variant_row("Model A", "Base", "10000"),
            variant_row("Model A", "Sport", "12000"),
        ];
        RecordStore::load(&cars, &variants, &ColumnConfig::default())
    }

    #[test]
    fn test_assemble_found() {
        let store = sample_store();
        let view = DetailAssembler::new(&store).assemble("model a");
        let car = view.car().unwrap();
        assert_eq!(car.name, "Model A");
        assert_eq!(car.variants.len(), 2);
        assert_eq!(car.price, "9,500");
        assert_eq!(car.selected_variant, None);
        assert!(!view.is_not_found());
    }

    #[test]
    fn test_variant_selection_is_view_local() {
        let store = sample_store();
        let mut view = DetailAssembler::new(&store).assemble("Model A");

        assert!(view.select_variant_named("Sport"));
        assert_eq!(view.car().unwrap().price, "12000");
        assert_eq!(view.car().unwrap().selected_variant, Some(1));
        assert_eq!(store.lookup("Model A").unwrap().price, "9,500");

        assert!(!view.select_variant(5));
        assert!(!view.select_variant_named("Turbo"));
        assert_eq!(view.car().unwrap().price, "12000");

        view.clear_selection();
        assert_eq!(view.car().unwrap().price, "9,500");
    }

    #[test]
    fn test_first_variant_is_selectable() {
        let store = sample_store();
        let mut view = DetailAssembler::new(&store).assemble("Model A");
        assert!(view.select_variant(0));
        assert_eq!(view.car().unwrap().price, "10000");
    }

    #[test]
    fn test_car_without_variants() {
        let store = sample_store();
        let mut view = DetailAssembler::new(&store).assemble("MODEL B");
        assert!(view.car().unwrap().variants.is_empty());
        assert!(!view.select_variant(0));
        assert_eq!(view.car().unwrap().price, "8,000");
    }

    #[test]
    fn test_not_found_is_never_partial() {
        let store = sample_store();
        let mut view = DetailAssembler::new(&store).assemble("Model C");
        assert!(view.is_not_found());
        assert!(view.car().is_none());
        assert!(!view.select_variant(0));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json, serde_json::json!({"notFound": true, "unavailable": false}));
    }

    #[test]
    fn test_unavailable_store() {
        let pending = RecordStore::pending();
        let view = DetailAssembler::new(&pending).assemble("Model A");
        assert!(view.is_unavailable());
        assert!(!view.is_not_found());
        assert!(view.car().is_none());
    }

    #[test]
    fn test_view_model_json() {
        let store = sample_store();
        let view = DetailAssembler::new(&store).assemble("Model A");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["name"], "Model A");
        assert_eq!(json["driveType"], "FWD");
        assert_eq!(json["fuelTankCapacity"], "40 L");
        assert_eq!(json["imageRef"], "img/car.png");
        assert_eq!(json["variants"][1]["name"], "Sport");
        assert_eq!(json["notFound"], false);
    }
}
