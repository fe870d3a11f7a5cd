//! Interpolated presentation parameters for the three stage layers.
//!
//! Pure consumer of `(phase, fraction)`; the web layer turns these numbers
//! into inline styles. Curves match the page design: the country map zooms
//! until it overshoots, the region map cross-fades in and then parks in the
//! left column, and the festival panel slides in from the right.

use crate::phase::Phase;

/// Style parameters for one of the two map layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapLayerStyle {
    pub opacity: f32,
    pub scale: f32,
    /// Horizontal shift as a percentage of the element's width.
    pub translate_x_pct: f32,
}

/// Style parameters for the festival info panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelStyle {
    pub opacity: f32,
    pub translate_x_pct: f32,
    /// Whether the panel's internal content may scroll.
    pub scrollable: bool,
}

/// Everything the frontend needs to restyle the stage for one update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageStyles {
    pub france: MapLayerStyle,
    pub region: MapLayerStyle,
    pub festival: PanelStyle,
    pub body_class: &'static str,
    pub header_title: &'static str,
}

const FESTIVAL_HIDDEN: PanelStyle = PanelStyle {
    opacity: 0.0,
    translate_x_pct: 100.0,
    scrollable: false,
};

/// Compute the stage styles for a phase and its local fraction in [0, 1].
pub fn stage_styles(phase: Phase, fraction: f32) -> StageStyles {
    let f = fraction.clamp(0.0, 1.0);
    match phase {
        Phase::Map => StageStyles {
            france: MapLayerStyle {
                opacity: 1.0,
                scale: 1.0 + f * 2.5,
                translate_x_pct: 0.0,
            },
            region: MapLayerStyle {
                opacity: 0.0,
                scale: 0.8,
                translate_x_pct: 0.0,
            },
            festival: FESTIVAL_HIDDEN,
            body_class: "stage1-active",
            header_title: "Jazz à Saint Sat",
        },
        Phase::Region => StageStyles {
            france: MapLayerStyle {
                opacity: 1.0 - f,
                scale: 3.5 + f * 1.5,
                translate_x_pct: 0.0,
            },
            region: MapLayerStyle {
                opacity: f,
                scale: 0.8 + f * 2.2,
                translate_x_pct: 0.0,
            },
            festival: FESTIVAL_HIDDEN,
            body_class: "stage2-active",
            header_title: "Région Auvergne-Rhône-Alpes",
        },
        Phase::Festival => StageStyles {
            france: MapLayerStyle {
                opacity: 0.0,
                scale: 3.5,
                translate_x_pct: 0.0,
            },
            region: MapLayerStyle {
                // The region map stays partly visible as it slides left.
                opacity: (1.0 - f * 0.4).max(0.6),
                scale: 3.0 + f * 0.5,
                translate_x_pct: -50.0 * f,
            },
            festival: PanelStyle {
                opacity: f.min(1.0),
                translate_x_pct: 50.0 - f * 50.0,
                scrollable: true,
            },
            body_class: "stage3-active",
            header_title: "Festival Jazz à Saint Sat",
        },
    }
}
