//! Static catalog of components, extras, performance data and build profiles

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::models::{
    BuildProfile, Category, ComponentOption, CpuPerf, ExtraOption, GpuPerf, RamPerf,
};

/// Immutable lookup tables for everything the configurator can sell.
///
/// Built once at startup from embedded data and passed explicitly to the
/// engine, so quote computation stays a pure function of its inputs.
/// Pricing and performance are held in separate tables: a component can be
/// priced even when its performance coefficients are missing, in which case
/// the engine degrades metrics rather than the quote.
#[derive(Debug)]
pub struct Catalog {
    pub(crate) components: IndexMap<Category, IndexMap<String, ComponentOption>>,
    pub(crate) extras: IndexMap<String, ExtraOption>,
    pub(crate) cpu_perf: IndexMap<String, CpuPerf>,
    pub(crate) gpu_perf: IndexMap<String, GpuPerf>,
    pub(crate) ram_perf: IndexMap<String, RamPerf>,
    pub(crate) profiles: IndexMap<String, BuildProfile>,
}

impl Catalog {
    /// Look up a component by category and id
    pub fn lookup(&self, category: Category, id: &str) -> Option<&ComponentOption> {
        self.components.get(&category)?.get(id)
    }

    /// Look up an extra by id
    pub fn lookup_extra(&self, id: &str) -> Option<&ExtraOption> {
        self.extras.get(id)
    }

    /// CPU performance coefficients, independent of pricing
    pub fn cpu_perf(&self, id: &str) -> Option<CpuPerf> {
        self.cpu_perf.get(id).copied()
    }

    /// GPU performance coefficients, independent of pricing
    pub fn gpu_perf(&self, id: &str) -> Option<GpuPerf> {
        self.gpu_perf.get(id).copied()
    }

    /// RAM performance coefficients, independent of pricing
    pub fn ram_perf(&self, id: &str) -> Option<RamPerf> {
        self.ram_perf.get(id).copied()
    }

    /// Look up a named build profile
    pub fn resolve_profile(&self, name: &str) -> Option<&BuildProfile> {
        self.profiles.get(name)
    }

    /// All options in a category, in catalog order
    pub fn options(&self, category: Category) -> impl Iterator<Item = &ComponentOption> {
        self.components
            .get(&category)
            .into_iter()
            .flat_map(IndexMap::values)
    }

    /// All extras, in catalog order
    pub fn extras(&self) -> impl Iterator<Item = &ExtraOption> {
        self.extras.values()
    }

    /// All build profiles with their names, in catalog order
    pub fn profiles(&self) -> impl Iterator<Item = (&str, &BuildProfile)> {
        self.profiles.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// The built-in catalog shipped with the configurator
    pub fn builtin() -> Catalog {
        let mut components: IndexMap<Category, IndexMap<String, ComponentOption>> =
            IndexMap::new();

        let mut add = |category: Category, id: &str, name: &str, price: u64, tdp: f64| {
            components.entry(category).or_default().insert(
                id.to_string(),
                ComponentOption {
                    id: id.to_string(),
                    display_name: name.to_string(),
                    price,
                    tdp,
                },
            );
        };

        add(Category::Cpu, "ryzen9", "AMD Ryzen 9 9950X", 45_000, 120.0);
        add(Category::Cpu, "i9", "Intel Core i9-14900K", 58_000, 150.0);
        add(
            Category::Cpu,
            "threadripper",
            "AMD Threadripper 7970X",
            130_000,
            280.0,
        );

        add(
            Category::Gpu,
            "rtx5090",
            "NVIDIA GeForce RTX 5090",
            210_000,
            450.0,
        );
        add(
            Category::Gpu,
            "rtx5080",
            "NVIDIA GeForce RTX 5080",
            120_000,
            360.0,
        );
        add(Category::Gpu, "radeon", "AMD Radeon RX 8900 XT", 95_000, 300.0);

        add(Category::Ram, "32", "32 GB DDR5-6000", 16_000, 0.0);
        add(Category::Ram, "64", "64 GB DDR5-6000", 30_000, 0.0);
        add(Category::Ram, "128", "128 GB DDR5-5600", 55_000, 0.0);

        add(Category::Storage, "2tb", "2 TB NVMe SSD", 12_000, 0.0);
        add(Category::Storage, "4tb", "4 TB NVMe SSD", 20_000, 0.0);
        add(Category::Storage, "8tb", "8 TB NVMe SSD", 38_000, 0.0);

        let mut extras = IndexMap::new();
        let mut add_extra =
            |id: &str, name: &str, price: u64, cooling_effect: f64, render_effect: f64| {
                extras.insert(
                    id.to_string(),
                    ExtraOption {
                        id: id.to_string(),
                        display_name: name.to_string(),
                        price,
                        cooling_effect,
                        render_effect,
                    },
                );
            };

        add_extra("cooling", "Liquid cooling loop", 18_000, 18.0, -2.0);
        add_extra("sleeves", "Sleeved cable kit", 4_000, 4.0, 0.0);
        add_extra("rgb", "RGB lighting", 6_000, -2.0, 0.0);

        let cpu_perf = IndexMap::from([
            (
                "ryzen9".to_string(),
                CpuPerf {
                    render_minutes: 26.0,
                    boost: 1.08,
                },
            ),
            (
                "i9".to_string(),
                CpuPerf {
                    render_minutes: 24.0,
                    boost: 1.05,
                },
            ),
            (
                "threadripper".to_string(),
                CpuPerf {
                    render_minutes: 14.0,
                    boost: 1.18,
                },
            ),
        ]);

        let gpu_perf = IndexMap::from([
            ("rtx5090".to_string(), GpuPerf { base_fps: 215.0 }),
            ("rtx5080".to_string(), GpuPerf { base_fps: 180.0 }),
            ("radeon".to_string(), GpuPerf { base_fps: 172.0 }),
        ]);

        let ram_perf = IndexMap::from([
            (
                "32".to_string(),
                RamPerf {
                    fps_modifier: -8.0,
                    render_minutes_modifier: 6.0,
                },
            ),
            (
                "64".to_string(),
                RamPerf {
                    fps_modifier: 0.0,
                    render_minutes_modifier: 0.0,
                },
            ),
            (
                "128".to_string(),
                RamPerf {
                    fps_modifier: 5.0,
                    render_minutes_modifier: -4.0,
                },
            ),
        ]);

        let profile = |cpu: &str, gpu: &str, ram: &str, storage: &str, extras: &[&str], budget| {
            BuildProfile {
                components: IndexMap::from([
                    (Category::Cpu, cpu.to_string()),
                    (Category::Gpu, gpu.to_string()),
                    (Category::Ram, ram.to_string()),
                    (Category::Storage, storage.to_string()),
                ]),
                extras: extras.iter().map(|id| id.to_string()).collect::<BTreeSet<_>>(),
                budget,
            }
        };

        let profiles = IndexMap::from([
            (
                "gaming".to_string(),
                profile("ryzen9", "rtx5090", "64", "4tb", &["cooling", "rgb"], 380_000),
            ),
            (
                "creator".to_string(),
                profile(
                    "threadripper",
                    "rtx5080",
                    "128",
                    "8tb",
                    &["cooling", "sleeves"],
                    520_000,
                ),
            ),
            (
                "pro".to_string(),
                profile("i9", "radeon", "64", "4tb", &["sleeves"], 340_000),
            ),
        ]);

        Catalog {
            components,
            extras,
            cpu_perf,
            gpu_perf,
            ram_perf,
            profiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hits_and_misses() {
        let catalog = Catalog::builtin();

        let cpu = catalog.lookup(Category::Cpu, "ryzen9").unwrap();
        assert_eq!(cpu.price, 45_000);
        assert_eq!(cpu.tdp, 120.0);

        assert!(catalog.lookup(Category::Gpu, "voodoo2").is_none());
        assert!(catalog.lookup_extra("nonexistent").is_none());
        assert!(catalog.resolve_profile("mining").is_none());
    }

    #[test]
    fn storage_carries_no_tdp() {
        let catalog = Catalog::builtin();
        for option in catalog.options(Category::Storage) {
            assert_eq!(option.tdp, 0.0);
        }
        for option in catalog.options(Category::Ram) {
            assert_eq!(option.tdp, 0.0);
        }
    }

    /// Every profile must reference only ids that exist in the catalog.
    #[test]
    fn profiles_reference_known_ids() {
        let catalog = Catalog::builtin();
        for (name, profile) in catalog.profiles() {
            for category in Category::ALL {
                let id = profile
                    .components
                    .get(&category)
                    .unwrap_or_else(|| panic!("profile {name} misses {category}"));
                assert!(
                    catalog.lookup(category, id).is_some(),
                    "profile {name}: unknown {category} id {id}"
                );
            }
            for id in &profile.extras {
                assert!(
                    catalog.lookup_extra(id).is_some(),
                    "profile {name}: unknown extra id {id}"
                );
            }
        }
    }

    /// Every priced cpu/gpu/ram option must also have performance data, so
    /// the built-in catalog never produces degraded metrics on its own.
    #[test]
    fn builtin_performance_tables_are_complete() {
        let catalog = Catalog::builtin();
        for option in catalog.options(Category::Cpu) {
            assert!(catalog.cpu_perf(&option.id).is_some());
        }
        for option in catalog.options(Category::Gpu) {
            assert!(catalog.gpu_perf(&option.id).is_some());
        }
        for option in catalog.options(Category::Ram) {
            assert!(catalog.ram_perf(&option.id).is_some());
        }
    }
}
