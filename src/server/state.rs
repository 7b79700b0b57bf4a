use crate::location::{LocationResolver, ReverseGeocoder};
use std::sync::Arc;

pub struct AppState {
    pub resolver: LocationResolver,
    pub geocoder: Arc<dyn ReverseGeocoder>,
}
