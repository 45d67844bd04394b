//! Quote calculation engine
//!
//! Pure functions from a [`Selection`] and the [`Catalog`] to a [`Quote`].
//! No I/O, no hidden state: identical inputs always produce an identical
//! quote.

use log::debug;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::models::{Category, ComponentOption, ExtraOption, LineItem, Metrics, Quote, Selection};

/// Base value the cooling gauge starts from before TDP and extras apply
const COOLING_BASE: f64 = 85.0;
/// Cooling gauge bounds; the score is shown as a percentage-like bar and
/// must stay in a sane visual range for any TDP/extras combination
const COOLING_MIN: f64 = 35.0;
const COOLING_MAX: f64 = 100.0;
/// Fraction of an extra's cooling effect that carries over into FPS
const FPS_COOLING_FACTOR: f64 = 0.4;
/// Flat FPS penalty when the build exceeds its budget
const FPS_OVER_BUDGET_PENALTY: f64 = 5.0;
/// Displayed FPS never drops below this
const FPS_FLOOR: f64 = 120.0;
/// Render-time floor, re-applied after every extra's contribution
const RENDER_FLOOR: f64 = 8.0;

/// A quote could not be computed because the selection is not complete.
///
/// Unknown extras are not an error (they are silently dropped) and a missing
/// performance-table entry only degrades metrics; an unresolved required
/// category is the one condition with no usable total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("no valid {category} selected")]
    IncompleteSelection { category: Category },
}

/// Compute the quote for a selection: price total, budget delta, summary
/// rows and, when the performance tables cover every chosen component, the
/// derived cooling/FPS/render metrics.
pub fn compute_quote(selection: &Selection, catalog: &Catalog) -> Result<Quote, QuoteError> {
    // All four categories must resolve; a partial total would mislead.
    let resolve = |category: Category| {
        selection
            .components
            .get(&category)
            .and_then(|id| catalog.lookup(category, id))
            .ok_or(QuoteError::IncompleteSelection { category })
    };
    let cpu = resolve(Category::Cpu)?;
    let gpu = resolve(Category::Gpu)?;
    let ram = resolve(Category::Ram)?;
    let storage = resolve(Category::Storage)?;
    let resolved = [
        (Category::Cpu, cpu),
        (Category::Gpu, gpu),
        (Category::Ram, ram),
        (Category::Storage, storage),
    ];

    // Stale extra ids from the UI are dropped, not fatal.
    let extras: Vec<&ExtraOption> = selection
        .extras
        .iter()
        .filter_map(|id| {
            let extra = catalog.lookup_extra(id);
            if extra.is_none() {
                debug!("ignoring unknown extra id {id:?}");
            }
            extra
        })
        .collect();

    let total = resolved.iter().map(|(_, option)| option.price).sum::<u64>()
        + extras.iter().map(|extra| extra.price).sum::<u64>();
    let budget_delta = selection.budget as i64 - total as i64;

    let mut line_items: Vec<LineItem> = resolved
        .iter()
        .map(|(category, option)| LineItem {
            label: category.label().to_string(),
            value: option.display_name.clone(),
        })
        .collect();
    if !extras.is_empty() {
        let names: Vec<&str> = extras.iter().map(|e| e.display_name.as_str()).collect();
        line_items.push(LineItem {
            label: "Extras".to_string(),
            value: names.join(" · "),
        });
    }

    let metrics = compute_metrics(catalog, cpu, gpu, ram, &extras, total, selection.budget);

    Ok(Quote {
        line_items,
        total,
        budget_delta,
        metrics,
    })
}

/// Derive the performance metrics, or `None` when a priced component has no
/// entry in its performance table. Pricing and performance are resolved
/// independently: a catalog inconsistency degrades metrics only.
fn compute_metrics(
    catalog: &Catalog,
    cpu: &ComponentOption,
    gpu: &ComponentOption,
    ram: &ComponentOption,
    extras: &[&ExtraOption],
    total: u64,
    budget: u64,
) -> Option<Metrics> {
    let cpu_perf = catalog.cpu_perf(&cpu.id)?;
    let gpu_perf = catalog.gpu_perf(&gpu.id)?;
    let ram_perf = catalog.ram_perf(&ram.id)?;

    let cooling_gain: f64 = extras.iter().map(|extra| extra.cooling_effect).sum();
    let cooling_score_percent = (COOLING_BASE - (cpu.tdp + gpu.tdp) / 10.0 + cooling_gain)
        .clamp(COOLING_MIN, COOLING_MAX);

    // The boost multiplies only the GPU+RAM base; extras and the budget
    // penalty are additive on top.
    let mut fps = (gpu_perf.base_fps + ram_perf.fps_modifier) * cpu_perf.boost;
    for extra in extras {
        if extra.cooling_effect != 0.0 {
            fps += extra.cooling_effect * FPS_COOLING_FACTOR;
        }
    }
    if total > budget {
        fps -= FPS_OVER_BUDGET_PENALTY;
    }
    let fps_estimate = fps.max(FPS_FLOOR).round() as u32;

    let render_minutes = fold_render_time(
        cpu_perf.render_minutes + ram_perf.render_minutes_modifier,
        extras.iter().map(|extra| extra.render_effect),
    );

    Some(Metrics {
        cooling_score_percent,
        fps_estimate,
        render_time_minutes: render_minutes.round() as u32,
    })
}

/// Accumulate render-time effects with the floor applied inside each fold
/// step. The clamp is part of the combining function on purpose:
/// `max(8, max(8, a+b)+c)` is not the same as `max(8, a+b+c)` when an
/// intermediate value dips below the floor.
fn fold_render_time(base: f64, effects: impl Iterator<Item = f64>) -> f64 {
    effects.fold(base.max(RENDER_FLOOR), |acc, effect| {
        (acc + effect).max(RENDER_FLOOR)
    })
}

/// Materialize a named build profile into a concrete selection.
///
/// Returns `None` for an unknown profile name; callers are expected to fall
/// back to the default `gaming` profile.
pub fn apply_profile(name: &str, catalog: &Catalog) -> Option<Selection> {
    let profile = catalog.resolve_profile(name)?;
    Some(Selection {
        components: profile.components.clone(),
        extras: profile.extras.clone(),
        budget: profile.budget,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn gaming_components(budget: u64) -> Selection {
        let mut selection = apply_profile("gaming", &Catalog::builtin()).unwrap();
        selection.extras.clear();
        selection.budget = budget;
        selection
    }

    #[test]
    fn total_is_sum_of_component_prices() {
        let catalog = Catalog::builtin();
        let quote = compute_quote(&gaming_components(380_000), &catalog).unwrap();

        // 45000 + 210000 + 30000 + 20000
        assert_eq!(quote.total, 305_000);
        assert_eq!(quote.budget_delta, 75_000);

        let metrics = quote.metrics.unwrap();
        // 85 - (120 + 450) / 10 = 28, clamped up to the gauge floor
        assert_approx_eq!(f64, metrics.cooling_score_percent, 35.0);
        // round(215 * 1.08)
        assert_eq!(metrics.fps_estimate, 232);
        assert_eq!(metrics.render_time_minutes, 26);
    }

    #[test]
    fn over_budget_build_pays_the_fps_penalty() {
        let catalog = Catalog::builtin();
        let quote = compute_quote(&gaming_components(200_000), &catalog).unwrap();

        assert_eq!(quote.budget_delta, -105_000);
        // round(215 * 1.08 - 5)
        assert_eq!(quote.metrics.unwrap().fps_estimate, 227);
    }

    #[test]
    fn extras_add_price_cooling_and_fps() {
        let catalog = Catalog::builtin();
        let selection = apply_profile("gaming", &catalog).unwrap();
        let quote = compute_quote(&selection, &catalog).unwrap();

        // components 305000 + cooling 18000 + rgb 6000
        assert_eq!(quote.total, 329_000);
        let metrics = quote.metrics.unwrap();
        // 85 - 57 + 18 - 2
        assert_approx_eq!(f64, metrics.cooling_score_percent, 44.0);
        // 232.2 + 0.4 * 18 - 0.4 * 2
        assert_eq!(metrics.fps_estimate, 239);
        // 26 - 2 from the cooling loop
        assert_eq!(metrics.render_time_minutes, 24);
    }

    #[rstest]
    #[case("gaming")]
    #[case("creator")]
    #[case("pro")]
    fn profile_round_trips_through_the_quote(#[case] name: &str) {
        let catalog = Catalog::builtin();
        let profile_budget = catalog.resolve_profile(name).unwrap().budget;
        let selection = apply_profile(name, &catalog).unwrap();
        assert_eq!(selection.budget, profile_budget);

        let quote = compute_quote(&selection, &catalog).unwrap();
        for (i, category) in Category::ALL.into_iter().enumerate() {
            let id = &selection.components[&category];
            let expected = &catalog.lookup(category, id).unwrap().display_name;
            assert_eq!(quote.line_items[i].label, category.label());
            assert_eq!(&quote.line_items[i].value, expected);
        }
    }

    #[test]
    fn unknown_profile_is_none() {
        assert!(apply_profile("mining", &Catalog::builtin()).is_none());
    }

    #[rstest]
    #[case(Category::Cpu)]
    #[case(Category::Storage)]
    fn missing_category_is_incomplete(#[case] category: Category) {
        let catalog = Catalog::builtin();
        let mut selection = apply_profile("gaming", &catalog).unwrap();
        selection.components.shift_remove(&category);

        let err = compute_quote(&selection, &catalog).unwrap_err();
        assert_eq!(err, QuoteError::IncompleteSelection { category });
    }

    #[test]
    fn unknown_component_id_is_incomplete() {
        let catalog = Catalog::builtin();
        let mut selection = apply_profile("gaming", &catalog).unwrap();
        selection
            .components
            .insert(Category::Gpu, "voodoo2".to_string());

        let err = compute_quote(&selection, &catalog).unwrap_err();
        assert_eq!(
            err,
            QuoteError::IncompleteSelection {
                category: Category::Gpu
            }
        );
    }

    #[test]
    fn stale_extra_id_is_silently_dropped() {
        let catalog = Catalog::builtin();
        let mut selection = gaming_components(380_000);
        let baseline = compute_quote(&selection, &catalog).unwrap();

        selection.extras.insert("discontinued".to_string());
        let quote = compute_quote(&selection, &catalog).unwrap();

        assert_eq!(quote.total, baseline.total);
        assert_eq!(quote.metrics, baseline.metrics);
        // no extras row either
        assert_eq!(quote.line_items.len(), 4);
    }

    #[test]
    fn missing_performance_entry_degrades_metrics_only() {
        let mut catalog = Catalog::builtin();
        catalog.ram_perf.shift_remove("64");

        let quote = compute_quote(&gaming_components(380_000), &catalog).unwrap();
        assert_eq!(quote.total, 305_000);
        assert_eq!(quote.budget_delta, 75_000);
        assert!(quote.metrics.is_none());
    }

    #[rstest]
    #[case("gaming")]
    #[case("creator")]
    #[case("pro")]
    fn metric_bounds_hold(#[case] name: &str) {
        let catalog = Catalog::builtin();
        let mut selection = apply_profile(name, &catalog).unwrap();
        selection.budget = 0; // force the over-budget penalty branch

        let metrics = compute_quote(&selection, &catalog).unwrap().metrics.unwrap();
        assert!((35.0..=100.0).contains(&metrics.cooling_score_percent));
        assert!(metrics.fps_estimate >= 120);
        assert!(metrics.render_time_minutes >= 8);
    }

    #[test]
    fn cooling_score_is_clamped_for_pathological_tdp() {
        let mut catalog = Catalog::builtin();
        catalog
            .components
            .get_mut(&Category::Gpu)
            .unwrap()
            .get_mut("rtx5090")
            .unwrap()
            .tdp = 10_000.0;

        let metrics = compute_quote(&gaming_components(2_000_000), &catalog)
            .unwrap()
            .metrics
            .unwrap();
        assert_approx_eq!(f64, metrics.cooling_score_percent, 35.0);

        catalog
            .components
            .get_mut(&Category::Gpu)
            .unwrap()
            .get_mut("rtx5090")
            .unwrap()
            .tdp = 0.0;
        catalog
            .components
            .get_mut(&Category::Cpu)
            .unwrap()
            .get_mut("ryzen9")
            .unwrap()
            .tdp = 0.0;
        catalog.extras.get_mut("cooling").unwrap().cooling_effect = 500.0;

        let mut selection = gaming_components(2_000_000);
        selection.extras.insert("cooling".to_string());
        let metrics = compute_quote(&selection, &catalog).unwrap().metrics.unwrap();
        assert_approx_eq!(f64, metrics.cooling_score_percent, 100.0);
    }

    #[rstest]
    #[case(26.0, &[], 26.0)]
    #[case(26.0, &[-2.0], 24.0)]
    #[case(1.0, &[], 8.0)]
    // The floor re-applies between steps: max(8, 26-30) + 5 = 13, while a
    // single end-of-fold clamp would give max(8, 1) = 8.
    #[case(26.0, &[-30.0, 5.0], 13.0)]
    #[case(26.0, &[-30.0], 8.0)]
    fn render_floor_applies_inside_the_fold(
        #[case] base: f64,
        #[case] effects: &[f64],
        #[case] expected: f64,
    ) {
        let result = fold_render_time(base, effects.iter().copied());
        assert_approx_eq!(f64, result, expected);
    }
}
