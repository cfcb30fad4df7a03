/*
Stagelight - by David Petnick
*/
use bevy::prelude::*;

use crate::catalog::{Catalog, GalleryImage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Treatment {
    Normal,
    /// Grayscale + Dimmed
    Desaturated,
}

/// Visual Weight of One Panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemWeight {
    pub is_active: bool,
    pub grow_factor: f32,
    pub treatment: Treatment,
}

impl ItemWeight {
    pub const ACTIVE: Self = Self {
        is_active: true,
        grow_factor: 1.0,
        treatment: Treatment::Normal,
    };

    pub const INACTIVE: Self = Self {
        is_active: false,
        grow_factor: 0.0,
        treatment: Treatment::Desaturated,
    };

    pub fn flex_basis_percent(&self) -> f32 {
        if self.is_active { 50.0 } else { 5.0 }
    }

    pub fn min_width_px(&self) -> f32 {
        if self.is_active { 300.0 } else { 20.0 }
    }

    /// Image Zooms Out Slightly When its Panel Opens
    pub fn image_zoom(&self) -> f32 {
        if self.is_active { 1.05 } else { 1.15 }
    }

    pub fn brightness(&self) -> f32 {
        match self.treatment {
            Treatment::Normal => 1.05,
            Treatment::Desaturated => 0.5,
        }
    }

    /// Multiplicative Image Tint Approximating the Filter
    /// (Vertex Tint Can't Remove Saturation, so Desaturated Gets a Cool Grey Wash)
    pub fn image_tint(&self) -> Color {
        match self.treatment {
            Treatment::Normal => Color::WHITE,
            Treatment::Desaturated => {
                let b = self.brightness();
                Color::srgb(b * 0.96, b * 0.92, b * 0.86)
            }
        }
    }

    /// Caption (Title + Description) on the Open Panel,
    /// Vertical Title on Collapsed Ones
    pub fn shows_caption(&self) -> bool {
        self.is_active
    }
}

/// Pure Function of (Catalog, Selection)
/// An Id Not in the Catalog Behaves Like No Selection
pub fn layout(images: &[GalleryImage], active: Option<&str>) -> Vec<ItemWeight> {
    images
        .iter()
        .map(|img| match active {
            Some(id) if img.id == id => ItemWeight::ACTIVE,
            _ => ItemWeight::INACTIVE,
        })
        .collect()
}

/// Current Hover Target; Owned by the Gallery Visit
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSelection(pub Option<String>);

impl ActiveSelection {
    /// Every Gallery Visit Opens on the First Catalog Entry
    pub fn first_of(catalog: &Catalog) -> Self {
        Self(catalog.first_id().map(str::to_owned))
    }

    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Pointer-Enter Overwrites Immediately; Returns True if it Moved
    pub fn hover(&mut self, id: &str) -> bool {
        if self.id() == Some(id) {
            return false;
        }
        self.0 = Some(id.to_owned());
        true
    }
}

/// Eased Panel State Chasing its 'ItemWeight' Targets
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelMotion {
    pub grow: f32,
    pub basis: f32,
    pub min_width: f32,
    pub zoom: f32,
}

impl PanelMotion {
    /// Panels Start Already Settled (No Intro Animation)
    pub fn settled(w: &ItemWeight) -> Self {
        Self {
            grow: w.grow_factor,
            basis: w.flex_basis_percent(),
            min_width: w.min_width_px(),
            zoom: w.image_zoom(),
        }
    }

    /// Exponential Approach; 'rate' is 1/s
    pub fn step_toward(&mut self, w: &ItemWeight, rate: f32, dt: f32) {
        let k = 1.0 - (-rate * dt).exp();
        self.grow += (w.grow_factor - self.grow) * k;
        self.basis += (w.flex_basis_percent() - self.basis) * k;
        self.min_width += (w.min_width_px() - self.min_width) * k;
        self.zoom += (w.image_zoom() - self.zoom) * k;
    }

    pub fn is_settled(&self, w: &ItemWeight) -> bool {
        (self.grow - w.grow_factor).abs() < 1e-3
            && (self.basis - w.flex_basis_percent()).abs() < 0.01
            && (self.zoom - w.image_zoom()).abs() < 1e-3
    }
}
