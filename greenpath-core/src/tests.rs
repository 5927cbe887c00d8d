//! Unit tests for the estimation and ranking engine.

#[cfg(test)]
mod estimate {
    use crate::TransportMode;
    use crate::estimate::*;

    #[test]
    fn emissions_zero_distance_is_zero() {
        for mode in TransportMode::ALL {
            assert_eq!(emissions(mode, 0.0), 0.0, "{mode}");
        }
    }

    #[test]
    fn emissions_linear_in_distance() {
        for mode in TransportMode::ALL {
            let single = emissions(mode, 3.0);
            assert!((emissions(mode, 6.0) - 2.0 * single).abs() < 1e-9, "{mode}");
        }
    }

    #[test]
    fn freight_uses_ton_km_basis() {
        // 500 kg over 100 km = 50 ton-km at 62 g each
        let grams = freight_emissions(TransportMode::FreightTruck, 500.0, 100.0);
        assert!((grams - 3100.0).abs() < 1e-9);
    }

    #[test]
    fn format_boundary_at_one_kilogram() {
        assert_eq!(format_emissions(999.0), "999g CO₂");
        assert_eq!(format_emissions(1000.0), "1.00 kg CO₂");
        assert_eq!(format_emissions(0.0), "0g CO₂");
        assert_eq!(format_emissions(2345.0), "2.35 kg CO₂");
    }

    #[test]
    fn credit_floor_semantics() {
        assert_eq!(carbon_credits(250.0), 2);
        assert_eq!(carbon_credits(99.0), 0);
        assert_eq!(carbon_credits(100.0), 1);
        assert_eq!(carbon_credits(-50.0), 0);
    }

    #[test]
    fn surge_multiplies_on_demand_cost_by_half() {
        let off_peak = trip_cost(TransportMode::Rideshare, 10.0, false, 1);
        let peak = trip_cost(TransportMode::Rideshare, 10.0, true, 1);
        assert!((peak - 1.5 * off_peak).abs() < 1e-9);

        // Walking has no surge
        let walk = trip_cost(TransportMode::Walk, 10.0, true, 1);
        assert_eq!(walk, 0.0);
    }

    #[test]
    fn surge_applies_before_passenger_division() {
        let base = trip_cost(TransportMode::Rideshare, 10.0, false, 1);
        let pooled_peak = trip_cost(TransportMode::Rideshare, 10.0, true, 2);
        assert!((pooled_peak - base * 1.5 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn pooling_only_for_car_and_rideshare() {
        let solo = trip_cost(TransportMode::Bus, 5.0, false, 1);
        let shared = trip_cost(TransportMode::Bus, 5.0, false, 4);
        assert_eq!(solo, shared);
    }

    #[test]
    fn travel_time_from_fixed_speed() {
        // 5 km at 5 km/h walking = 60 minutes
        assert!((travel_time_minutes(TransportMode::Walk, 5.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn calories_only_for_active_modes() {
        assert!(calories(TransportMode::Car, 10.0, 70.0).is_none());
        let walk = calories(TransportMode::Walk, 2.0, 70.0).unwrap();
        assert!((walk - 130.0).abs() < 1e-9);
        // Heavier rider burns proportionally more
        let heavy = calories(TransportMode::Walk, 2.0, 105.0).unwrap();
        assert!((heavy - 195.0).abs() < 1e-9);
    }

    #[test]
    fn savings_never_negative() {
        assert_eq!(savings(TransportMode::Taxi, 10.0, TransportMode::Car), 0.0);
        let bike = savings(TransportMode::Bike, 10.0, TransportMode::Car);
        assert!((bike - 1920.0).abs() < 1e-9);
    }

    #[test]
    fn emission_levels() {
        assert_eq!(emission_level(0.0), EmissionLevel::Zero);
        assert_eq!(emission_level(30.0), EmissionLevel::Low);
        assert_eq!(emission_level(100.0), EmissionLevel::Medium);
        assert_eq!(emission_level(200.0), EmissionLevel::High);
    }

    #[test]
    fn peak_windows() {
        for hour in [7, 8, 9, 17, 18, 19] {
            assert!(is_peak_hour(hour), "{hour}");
        }
        for hour in [0, 6, 10, 16, 20, 23] {
            assert!(!is_peak_hour(hour), "{hour}");
        }
    }

    #[test]
    fn mode_roundtrips_through_str() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.as_str().parse::<TransportMode>().unwrap(), mode);
        }
        assert!("hoverboard".parse::<TransportMode>().is_err());
    }
}

#[cfg(test)]
mod scoring {
    use geo::{LineString, coord};

    use crate::model::{PreferenceWeights, Route, TransportMode};
    use crate::scoring::{rank_routes, ranking_to_geojson};

    fn route(mode: TransportMode, duration_s: f64, cost: f64, emissions: f64) -> Route {
        Route {
            mode,
            path: LineString::new(vec![coord! {x: 0.0, y: 0.0}, coord! {x: 0.1, y: 0.1}]),
            distance_m: 5000.0,
            duration_s,
            cost_usd: cost,
            emissions_g: emissions,
            color: mode.render_color(),
            estimated: false,
        }
    }

    #[test]
    fn pure_time_weighting_ranks_fastest_first() {
        let weights = PreferenceWeights::new(100, 0, 0).unwrap();
        let routes = vec![
            route(TransportMode::Bus, 1200.0, 2.75, 400.0),
            route(TransportMode::Bike, 600.0, 2.75, 400.0),
            route(TransportMode::Walk, 1800.0, 2.75, 400.0),
        ];
        let ranked = rank_routes(routes, &weights);
        assert_eq!(ranked[0].route.mode, TransportMode::Bike);
        assert_eq!(ranked[2].route.mode, TransportMode::Walk);
        assert!(ranked[0].best);
        assert!(!ranked[1].best);
    }

    #[test]
    fn identical_candidates_all_score_100_in_input_order() {
        let weights = PreferenceWeights::default();
        let routes = vec![
            route(TransportMode::Bus, 600.0, 3.0, 100.0),
            route(TransportMode::Tram, 600.0, 3.0, 100.0),
            route(TransportMode::Train, 600.0, 3.0, 100.0),
        ];
        let ranked = rank_routes(routes, &weights);
        for scored in &ranked {
            assert!((scored.score - 100.0).abs() < 1e-9);
        }
        // Stable sort preserves input order on ties
        assert_eq!(ranked[0].route.mode, TransportMode::Bus);
        assert_eq!(ranked[1].route.mode, TransportMode::Tram);
        assert_eq!(ranked[2].route.mode, TransportMode::Train);
    }

    #[test]
    fn tied_nonzero_axis_scores_full_marks() {
        // Equal fares must not penalize anyone; time still differentiates.
        let weights = PreferenceWeights::new(0, 50, 50).unwrap();
        let routes = vec![
            route(TransportMode::Bus, 1200.0, 2.75, 400.0),
            route(TransportMode::Subway, 900.0, 2.75, 250.0),
        ];
        let ranked = rank_routes(routes, &weights);
        // Cost axis tied at 2.75: both get the full 50 cost points.
        assert_eq!(ranked[0].route.mode, TransportMode::Subway);
        assert!((ranked[0].score - (50.0 + (1.0 - 250.0 / 400.0) * 50.0)).abs() < 1e-9);
        assert!((ranked[1].score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_criteria_default_to_100() {
        let weights = PreferenceWeights::default();
        let ranked = rank_routes(vec![route(TransportMode::Walk, 0.0, 0.0, 0.0)], &weights);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 100.0).abs() < 1e-9);
        assert!(ranked[0].best);
    }

    #[test]
    fn empty_candidate_set_yields_empty_ranking() {
        let ranked = rank_routes(Vec::new(), &PreferenceWeights::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn geojson_export_carries_one_feature_per_route() {
        let weights = PreferenceWeights::default();
        let ranked = rank_routes(
            vec![
                route(TransportMode::Walk, 3600.0, 0.0, 0.0),
                route(TransportMode::Car, 450.0, 2.9, 960.0),
            ],
            &weights,
        );
        let collection = ranking_to_geojson(&ranked);
        assert_eq!(collection.features.len(), 2);
        let first = &collection.features[0];
        let props = first.properties.as_ref().unwrap();
        assert!(props.contains_key("score"));
        assert_eq!(
            props.get("best_match").and_then(|v| v.as_bool()),
            Some(true)
        );
    }
}

#[cfg(test)]
mod preferences {
    use crate::model::{Criterion, PreferenceWeights};

    #[test]
    fn default_sums_to_100() {
        let weights = PreferenceWeights::default();
        assert_eq!(weights.time + weights.cost + weights.emissions, 100);
    }

    #[test]
    fn proportional_redistribution() {
        let mut weights = PreferenceWeights::default(); // 50/30/20
        weights.set(Criterion::Time, 80);
        assert_eq!(weights.time, 80);
        // 6:4 split of the remaining 20
        assert_eq!(weights.cost, 12);
        assert_eq!(weights.emissions, 8);
        assert_eq!(weights.time + weights.cost + weights.emissions, 100);
    }

    #[test]
    fn even_split_when_others_are_zero() {
        let mut weights = PreferenceWeights::new(100, 0, 0).unwrap();
        weights.set(Criterion::Time, 60);
        assert_eq!(weights.time, 60);
        assert_eq!(weights.cost + weights.emissions, 40);
        assert_eq!(weights.cost, 20);
        assert_eq!(weights.emissions, 20);
    }

    #[test]
    fn sum_invariant_holds_across_slider_sweeps() {
        let mut weights = PreferenceWeights::default();
        for value in [0, 5, 33, 47, 80, 95, 100] {
            weights.set(Criterion::Cost, value);
            assert_eq!(
                weights.time + weights.cost + weights.emissions,
                100,
                "after cost={value}"
            );
            weights.set(Criterion::Emissions, 100 - value);
            assert_eq!(
                weights.time + weights.cost + weights.emissions,
                100,
                "after emissions={}",
                100 - value
            );
        }
    }

    #[test]
    fn values_above_100_are_clamped() {
        let mut weights = PreferenceWeights::default();
        weights.set(Criterion::Emissions, 250);
        assert_eq!(weights.emissions, 100);
        assert_eq!(weights.time, 0);
        assert_eq!(weights.cost, 0);
    }

    #[test]
    fn explicit_constructor_rejects_bad_sums() {
        assert!(PreferenceWeights::new(50, 50, 50).is_err());
        assert!(PreferenceWeights::new(0, 0, 100).is_ok());
    }

    #[test]
    fn validation_rejects_wrapping_sums() {
        // Would wrap to exactly 100 in 32-bit arithmetic.
        assert!(PreferenceWeights::new(u32::MAX, 101, 0).is_err());
        assert!(PreferenceWeights::new(u32::MAX, u32::MAX, u32::MAX).is_err());
    }
}

#[cfg(test)]
mod fallback {
    use geo::Point;

    use crate::TransportMode;
    use crate::fallback::{haversine_km, synthetic_route, terrain_multiplier};

    #[test]
    fn haversine_one_degree_of_latitude() {
        let a = Point::new(-88.0, 30.0);
        let b = Point::new(-88.0, 31.0);
        let d = haversine_km(a, b);
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn haversine_zero_for_identical_points() {
        let p = Point::new(80.27, 13.08);
        assert!(haversine_km(p, p) < 1e-9);
    }

    #[test]
    fn synthetic_distance_exceeds_straight_line() {
        // ~10 km apart along a meridian
        let start = Point::new(80.0, 13.0);
        let end = Point::new(80.0, 13.09);
        let straight_m = haversine_km(start, end) * 1000.0;

        let car = synthetic_route(TransportMode::Car, start, end, false);
        assert!(car.distance_m > straight_m);
        assert!((car.distance_m / straight_m - 1.4).abs() < 1e-6);
    }

    #[test]
    fn synthetic_route_is_marked_estimated_and_costed() {
        let start = Point::new(80.0, 13.0);
        let end = Point::new(80.1, 13.1);
        let bus = synthetic_route(TransportMode::Bus, start, end, false);
        assert!(bus.estimated);
        assert_eq!(bus.path.0.len(), 3);
        assert!(bus.emissions_g > 0.0);
        assert!(bus.cost_usd > 0.0);
        // Duration consistent with the mode's fixed speed
        let expected_s = bus.distance_km() / TransportMode::Bus.average_speed_kmh() * 3600.0;
        assert!((bus.duration_s - expected_s).abs() < 1e-6);
    }

    #[test]
    fn road_modes_wander_more_than_rail() {
        assert!(terrain_multiplier(TransportMode::Car) > terrain_multiplier(TransportMode::Train));
        assert!(terrain_multiplier(TransportMode::Walk) > 1.0);
    }
}

#[cfg(test)]
mod geocode {
    use crate::geocode::{GeocodeStage, parse_coordinate_pair, query_plan};

    #[test]
    fn literal_pair_bypasses_geocoder() {
        let point = parse_coordinate_pair("13.0827, 80.2707").unwrap().unwrap();
        assert!((point.y() - 13.0827).abs() < 1e-9);
        assert!((point.x() - 80.2707).abs() < 1e-9);
    }

    #[test]
    fn negative_coordinates_parse() {
        let point = parse_coordinate_pair("-33.86, 151.21").unwrap().unwrap();
        assert!(point.y() < 0.0);
    }

    #[test]
    fn addresses_are_not_coordinate_pairs() {
        assert!(parse_coordinate_pair("IIT Madras, Chennai").unwrap().is_none());
        assert!(parse_coordinate_pair("13.0827").unwrap().is_none());
        assert!(parse_coordinate_pair("1, 2, 3").unwrap().is_none());
    }

    #[test]
    fn out_of_range_pair_is_rejected() {
        assert!(parse_coordinate_pair("91.0, 10.0").is_err());
        assert!(parse_coordinate_pair("45.0, 181.0").is_err());
    }

    #[test]
    fn ladder_simplifies_long_addresses() {
        let plan = query_plan("Main Gate, IIT Madras, Sardar Patel Rd, Chennai, Tamil Nadu");
        assert_eq!(plan[0].stage, GeocodeStage::Exact);
        assert_eq!(plan[1].stage, GeocodeStage::Simplified);
        assert_eq!(plan[1].query, "Sardar Patel Rd, Chennai, Tamil Nadu");
    }

    #[test]
    fn short_address_gets_single_exact_attempt() {
        let plan = query_plan("Chennai");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].stage, GeocodeStage::Exact);
    }

    #[test]
    fn landmark_attempt_keeps_leading_part() {
        let plan = query_plan("Marina Beach, Kamarajar Salai, Chennai, Tamil Nadu, India");
        let landmark = plan
            .iter()
            .find(|a| a.stage == GeocodeStage::Landmark)
            .unwrap();
        assert!(landmark.query.starts_with("Marina Beach,"));
        assert!(landmark.query.ends_with("India"));
    }
}

#[cfg(test)]
mod safety {
    use geo::Point;

    use crate::safety::{SafetyCategory, fallback_pins};

    #[test]
    fn fallback_covers_every_category() {
        let pins = fallback_pins(Point::new(80.27, 13.08));
        for category in SafetyCategory::ALL {
            let count = pins.iter().filter(|p| p.category == category).count();
            assert!(count >= 4, "{category:?} has {count} pins");
        }
        assert!(pins.iter().all(|p| !p.live));
    }

    #[test]
    fn fallback_pins_stay_near_center() {
        let center = Point::new(80.27, 13.08);
        for pin in fallback_pins(center) {
            assert!((pin.lat - center.y()).abs() < 0.05);
            assert!((pin.lon - center.x()).abs() < 0.05);
        }
    }
}

#[cfg(test)]
mod tracking {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use crate::TransportMode;
    use crate::error::Error;
    use crate::tracking::*;

    #[derive(Default)]
    struct MemoryStore(HashMap<String, String>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, Error> {
            Ok(self.0.get(key).cloned())
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
            self.0.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn recording_a_bike_trip_earns_credits() {
        let mut state = SessionState::default();
        // 10 km by bike saves 1920 g vs car = 19 credits
        let earned = state.record_trip(TransportMode::Bike, 10.0, date());
        assert_eq!(earned, 19);
        assert_eq!(state.balance.credits, 19);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn car_trips_earn_nothing_but_are_logged() {
        let mut state = SessionState::default();
        let earned = state.record_trip(TransportMode::Car, 12.0, date());
        assert_eq!(earned, 0);
        assert_eq!(state.history.len(), 1);
        assert!(state.history[0].emissions_grams > 0.0);
    }

    #[test]
    fn totals_compare_against_all_car_baseline() {
        let mut state = SessionState::default();
        state.record_trip(TransportMode::Walk, 2.0, date());
        state.record_trip(TransportMode::Bus, 8.0, date());
        let totals = state.totals();
        assert_eq!(totals.trips, 2);
        assert!((totals.total_km - 10.0).abs() < 1e-9);
        // walk saves 384, bus saves (192-89)*8 = 824
        assert!((totals.total_saved_grams - 1208.0).abs() < 1e-9);
    }

    #[test]
    fn session_roundtrips_through_store() {
        let mut store = MemoryStore::default();
        let mut state = SessionState::default();
        state.record_trip(TransportMode::Subway, 6.0, date());
        save_session(&mut store, &state).unwrap();

        let loaded = load_session(&store).unwrap();
        assert_eq!(loaded.balance.credits, state.balance.credits);
        assert_eq!(loaded.history.len(), 1);
        assert_eq!(loaded.history[0].mode, TransportMode::Subway);
    }

    #[test]
    fn empty_store_seeds_demo_data() {
        let store = MemoryStore::default();
        let state = load_session(&store).unwrap();
        assert_eq!(state.balance.credits, 247);
        assert_eq!(state.history.len(), 5);
    }

    #[test]
    fn levels_and_achievements() {
        let balance = CarbonCreditBalance {
            credits: 247,
            total_saved_grams: 24_700.0,
        };
        assert_eq!(balance.level(), 3);
        assert_eq!(balance.credits_into_level(), 47);

        let unlocked: Vec<_> = achievements(247)
            .into_iter()
            .filter(|a| a.unlocked)
            .map(|a| a.name)
            .collect();
        assert_eq!(unlocked, ["Green Beginner"]);
    }

    #[test]
    fn corrupt_balance_value_is_a_storage_error() {
        let mut store = MemoryStore::default();
        store.set(KEY_CREDITS, "many").unwrap();
        store.set(KEY_TOTAL_SAVED, "1000").unwrap();
        assert!(matches!(load_session(&store), Err(Error::Storage(_))));
    }
}
