//! Domain types shared across adapters.

pub mod slider;

pub use slider::{
    MoveDirection, NewSlider, Slider, SliderFilter, SliderPosition, SliderStatus, SliderUpdate,
};
