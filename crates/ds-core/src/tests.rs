//! Unit tests for ds-core primitives.

#[cfg(test)]
mod ids {
    use crate::CustomerId;

    #[test]
    fn first_and_next() {
        assert_eq!(CustomerId::FIRST, CustomerId(1));
        assert_eq!(CustomerId(7).next(), CustomerId(8));
        assert_eq!(CustomerId::default(), CustomerId::FIRST);
    }

    #[test]
    fn display() {
        assert_eq!(CustomerId(7).to_string(), "#7");
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, DsError, MAX_HORIZON, SimConfig, SimTime};

    #[test]
    fn arithmetic() {
        let t = SimTime::new(10.0);
        assert_eq!(t + 5.0, SimTime::new(15.0));
        assert_eq!(SimTime::new(15.0) - t, 5.0);
        assert_eq!(t.since(SimTime::new(12.5)), -2.5);
    }

    #[test]
    fn negative_zero_equals_zero() {
        assert_eq!(SimTime::new(-0.0), SimTime::ZERO);
        assert_eq!(SimTime::ZERO.plus(-0.0), SimTime::ZERO);
    }

    #[test]
    fn total_order() {
        let mut times = vec![SimTime::new(3.0), SimTime::new(1.5), SimTime::new(2.0)];
        times.sort();
        assert_eq!(times, vec![SimTime::new(1.5), SimTime::new(2.0), SimTime::new(3.0)]);
    }

    #[test]
    #[should_panic(expected = "finite")]
    fn nan_rejected() {
        let _ = SimTime::new(f64::NAN);
    }

    #[test]
    fn clock_advances_and_resets() {
        let mut clock = Clock::new();
        assert_eq!(clock.now(), SimTime::ZERO);
        clock.advance_to(SimTime::new(4.0));
        clock.advance_to(SimTime::new(4.0));
        assert_eq!(clock.now(), SimTime::new(4.0));
        clock.reset();
        assert_eq!(clock.now(), SimTime::ZERO);
    }

    #[test]
    #[should_panic(expected = "backwards")]
    fn clock_refuses_to_go_backwards() {
        let mut clock = Clock::new();
        clock.advance_to(SimTime::new(4.0));
        clock.advance_to(SimTime::new(3.0));
    }

    #[test]
    fn sim_config_validation() {
        assert!(SimConfig::default().validate().is_ok());

        for horizon in [0.0, -5.0, f64::INFINITY, f64::NAN] {
            let cfg = SimConfig { horizon, ..SimConfig::default() };
            assert!(cfg.validate().is_err(), "horizon {horizon} accepted");
        }

        let cfg = SimConfig { estimate_interval_ms: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn horizon_ceiling() {
        let cfg = SimConfig { horizon: MAX_HORIZON, ..SimConfig::default() };
        assert!(cfg.validate().is_ok());
        let cfg = SimConfig { horizon: f64::MAX, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(DsError::InvalidParameter { field: "horizon", .. })));
    }
}

#[cfg(test)]
mod distribution {
    use crate::{DistributionKind, DistributionSpec, DsError, MAX_HORIZON, MAX_PARAMETER, Sampler, SimRng};

    const N: usize = 20_000;

    fn mean_of(spec: DistributionSpec) -> f64 {
        let sampler = Sampler::new(spec, "test").unwrap();
        let mut rng = SimRng::new(7);
        (0..N).map(|_| sampler.sample(&mut rng)).sum::<f64>() / N as f64
    }

    #[test]
    fn parse_names() {
        assert_eq!("Negexp".parse::<DistributionKind>().unwrap(), DistributionKind::Exponential);
        assert_eq!("normal".parse::<DistributionKind>().unwrap(), DistributionKind::Normal);
        assert_eq!(" Uniform ".parse::<DistributionKind>().unwrap(), DistributionKind::Uniform);
        assert_eq!("fixed".parse::<DistributionKind>().unwrap(), DistributionKind::Constant);
        assert!(matches!(
            "poisson".parse::<DistributionKind>(),
            Err(DsError::UnknownDistribution(_))
        ));
    }

    #[test]
    fn names_round_trip_through_display() {
        for kind in DistributionKind::ALL {
            assert_eq!(kind.to_string().parse::<DistributionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn non_positive_param_rejected() {
        assert!(Sampler::new(DistributionSpec::exponential(0.0), "arrival").is_err());
        assert!(Sampler::new(DistributionSpec::normal(-1.0), "arrival").is_err());
        assert!(Sampler::new(DistributionSpec::uniform(f64::NAN), "arrival").is_err());
    }

    #[test]
    fn oversized_param_rejected() {
        assert!(matches!(
            Sampler::new(DistributionSpec::uniform(1.0e308), "arrival"),
            Err(DsError::InvalidParameter { field: "arrival", .. })
        ));
        assert!(Sampler::new(DistributionSpec::exponential(MAX_PARAMETER * 2.0), "arrival").is_err());
    }

    #[test]
    fn samples_at_the_ceiling_fit_past_the_horizon() {
        let mut rng = SimRng::new(3);
        for kind in DistributionKind::ALL {
            let sampler = Sampler::new(DistributionSpec::new(kind, MAX_PARAMETER), "arrival").unwrap();
            for _ in 0..2_000 {
                let x = sampler.sample(&mut rng);
                assert!((MAX_HORIZON + 2.0 * x).is_finite(), "{kind} sample {x} overflows");
            }
        }
    }

    #[test]
    fn exponential_mean() {
        let m = mean_of(DistributionSpec::exponential(5.0));
        assert!((m - 5.0).abs() < 0.25, "mean {m}");
    }

    #[test]
    fn normal_mean() {
        let m = mean_of(DistributionSpec::normal(30.0));
        assert!((m - 30.0).abs() < 0.5, "mean {m}");
    }

    #[test]
    fn uniform_bounds() {
        let sampler = Sampler::new(DistributionSpec::uniform(30.0), "test").unwrap();
        let mut rng = SimRng::new(1);
        for _ in 0..N {
            let x = sampler.sample(&mut rng);
            assert!((15.0..45.0).contains(&x), "sample {x}");
        }
    }

    #[test]
    fn constant_is_constant() {
        let sampler = Sampler::new(DistributionSpec::constant(10.0), "test").unwrap();
        let mut rng = SimRng::new(1);
        assert!((0..100).all(|_| sampler.sample(&mut rng) == 10.0));
    }

    #[test]
    fn samples_never_negative() {
        // mean 1, sd 1/3: about one draw in a thousand falls below zero.
        let sampler = Sampler::new(DistributionSpec::normal(1.0), "test").unwrap();
        let mut rng = SimRng::new(3);
        assert!((0..N).all(|_| sampler.sample(&mut rng) >= 0.0));
    }

    #[test]
    fn same_seed_same_stream() {
        let sampler = Sampler::new(DistributionSpec::exponential(2.0), "test").unwrap();
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }

    #[test]
    fn scaled_keeps_family() {
        let spec = DistributionSpec::normal(8.0).scaled(0.5);
        assert_eq!(spec, DistributionSpec::normal(4.0));
    }
}

#[cfg(test)]
mod config {
    use crate::{DistributionSpec, DsError, ItemRange, MAX_PARAMETER, StoreConfig};

    #[test]
    fn defaults_are_valid() {
        let cfg = StoreConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.arrival, DistributionSpec::exponential(5.0));
        assert_eq!(cfg.service, DistributionSpec::normal(8.0));
        assert_eq!(cfg.multipliers.express, 0.7);
        assert_eq!(cfg.regular_items, ItemRange::new(10, 30));
        assert_eq!(cfg.express_items, ItemRange::new(1, 10));
        assert_eq!(cfg.express_probability(), 0.2);
    }

    #[test]
    fn bad_percentage_rejected() {
        let cfg = StoreConfig { express_percentage: 120.0, ..StoreConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(DsError::InvalidParameter { field: "express_percentage", .. })
        ));
    }

    #[test]
    fn bad_item_ranges_rejected() {
        let cfg = StoreConfig { regular_items: ItemRange::new(30, 10), ..StoreConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = StoreConfig { express_items: ItemRange::new(0, 10), ..StoreConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bad_multiplier_rejected() {
        let mut cfg = StoreConfig::default();
        cfg.multipliers.self_checkout = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(DsError::InvalidParameter { field: "multipliers.self_checkout", .. })
        ));
    }

    #[test]
    fn oversized_scaled_service_rejected() {
        // Valid on its own, too large once the self-checkout multiplier applies.
        let cfg = StoreConfig { service: DistributionSpec::normal(MAX_PARAMETER), ..StoreConfig::default() };
        assert!(cfg.service.validate("service").is_ok());
        assert!(matches!(
            cfg.validate(),
            Err(DsError::InvalidParameter { field: "service.self_checkout", .. })
        ));

        let mut cfg = StoreConfig::default();
        cfg.multipliers.regular = f64::MAX;
        assert!(matches!(
            cfg.validate(),
            Err(DsError::InvalidParameter { field: "service.regular", .. })
        ));
    }

    #[test]
    fn bad_distribution_rejected() {
        let cfg = StoreConfig { arrival: DistributionSpec::exponential(-1.0), ..StoreConfig::default() };
        assert!(matches!(cfg.validate(), Err(DsError::InvalidParameter { field: "arrival", .. })));
    }

    #[test]
    fn item_range_contains_bounds() {
        let r = ItemRange::new(1, 10);
        assert!(r.contains(1) && r.contains(10));
        assert!(!r.contains(0) && !r.contains(11));
    }
}
