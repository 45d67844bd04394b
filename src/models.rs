//! Data models for PC components, selections and quotes

use std::collections::BTreeSet;

use clap::ValueEnum;
use indexmap::IndexMap;

/// The four component slots every build must fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Category {
    Cpu,
    Gpu,
    Ram,
    Storage,
}

impl Category {
    /// All required categories, in summary display order
    pub const ALL: [Category; 4] = [
        Category::Cpu,
        Category::Gpu,
        Category::Ram,
        Category::Storage,
    ];

    /// Label used for summary rows and tables
    pub fn label(self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "Graphics",
            Category::Ram => "Memory",
            Category::Storage => "Storage",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One selectable item within a category
#[derive(Debug, Clone)]
pub struct ComponentOption {
    pub id: String,
    pub display_name: String,
    pub price: u64,
    /// Thermal design power in watts; 0 for categories without a TDP figure
    pub tdp: f64,
}

/// One optional add-on (cooling kit, cable sleeves, RGB lighting)
#[derive(Debug, Clone)]
pub struct ExtraOption {
    pub id: String,
    pub display_name: String,
    pub price: u64,
    /// Signed contribution to the cooling score
    pub cooling_effect: f64,
    /// Signed contribution to the render-time estimate
    pub render_effect: f64,
}

/// CPU entry in the performance table
#[derive(Debug, Clone, Copy)]
pub struct CpuPerf {
    pub render_minutes: f64,
    pub boost: f64,
}

/// GPU entry in the performance table
#[derive(Debug, Clone, Copy)]
pub struct GpuPerf {
    pub base_fps: f64,
}

/// RAM entry in the performance table
#[derive(Debug, Clone, Copy)]
pub struct RamPerf {
    pub fps_modifier: f64,
    pub render_minutes_modifier: f64,
}

/// A named preset bundle used to pre-fill the configurator
#[derive(Debug, Clone)]
pub struct BuildProfile {
    pub components: IndexMap<Category, String>,
    pub extras: BTreeSet<String>,
    pub budget: u64,
}

/// The user's current choices, rebuilt fresh on every interaction
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Chosen component id per category; categories may be absent until the
    /// user has picked everything
    pub components: IndexMap<Category, String>,
    pub extras: BTreeSet<String>,
    pub budget: u64,
}

/// One row of the quote summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub label: String,
    pub value: String,
}

/// Derived performance figures for a quote
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Cooling gauge value, always within [35, 100]
    pub cooling_score_percent: f64,
    /// Expected frames per second, always >= 120
    pub fps_estimate: u32,
    /// Expected render time in minutes, always >= 8
    pub render_time_minutes: u32,
}

/// The computed result for one selection
#[derive(Debug, Clone)]
pub struct Quote {
    pub line_items: Vec<LineItem>,
    pub total: u64,
    /// `budget - total`; positive means under budget
    pub budget_delta: i64,
    /// None when a performance-table lookup failed; pricing stays valid
    pub metrics: Option<Metrics>,
}
