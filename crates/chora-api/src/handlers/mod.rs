mod features;
mod health;
mod layers;

pub use features::get_feature_details;
pub use health::health_check;
pub use layers::{filter_layer, get_layer_data, list_layers};
