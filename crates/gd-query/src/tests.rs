//! Unit tests for gd-query.

#[cfg(test)]
mod helpers {
    use gd_core::GeoPoint;

    /// Ring order, lat/lon from (0,0) to (2,2).
    pub fn square(min: f64, max: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(min, min),
            GeoPoint::new(min, max),
            GeoPoint::new(max, max),
            GeoPoint::new(max, min),
        ]
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bounds {
    use gd_core::{GeoPoint, PointLike, EARTH_RADIUS_M};
    use gd_metric::{destination_point, Geodesic};

    use crate::{bounds, bounds_of_distance, center};

    #[test]
    fn empty_collection() {
        let none: [GeoPoint; 0] = [];
        assert_eq!(bounds(&none).unwrap(), None);
        assert_eq!(center(&none).unwrap(), None);
    }

    #[test]
    fn contains_every_point() {
        let points = [
            GeoPoint::new(51.5, -0.12),
            GeoPoint::new(48.85, 2.35),
            GeoPoint::new(52.52, 13.4),
            GeoPoint::new(41.9, 12.5),
        ];
        let b = bounds(&points).unwrap().unwrap();
        assert_eq!((b.min_lat, b.max_lat), (41.9, 52.52));
        assert_eq!((b.min_lon, b.max_lon), (-0.12, 13.4));
        assert!(points.iter().all(|p| b.contains(p)));
        assert_eq!(b.min_elevation, None);
    }

    #[test]
    fn elevation_follows_first_point() {
        let with = [
            GeoPoint::with_elevation(0.0, 0.0, 10.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::with_elevation(2.0, 2.0, -3.0),
        ];
        let b = bounds(&with).unwrap().unwrap();
        assert_eq!((b.min_elevation, b.max_elevation), (Some(-3.0), Some(10.0)));

        let without = [GeoPoint::new(0.0, 0.0), GeoPoint::with_elevation(1.0, 1.0, 50.0)];
        let b = bounds(&without).unwrap().unwrap();
        assert_eq!((b.min_elevation, b.max_elevation), (None, None));
    }

    #[test]
    fn mixed_shapes() {
        let points = vec![
            PointLike::lat_lng(1.0, 1.0),
            PointLike::from(vec![PointLike::from(-3.0), PointLike::from(4.0)]),
        ];
        let b = bounds(&points).unwrap().unwrap();
        assert_eq!((b.min_lat, b.max_lat, b.min_lon, b.max_lon), (1.0, 4.0, -3.0, 1.0));
    }

    #[test]
    fn center_is_box_midpoint() {
        let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.5, 0.1), GeoPoint::new(2.0, 2.0)];
        let c = center(&points).unwrap().unwrap();
        assert_eq!((c.lat, c.lon), (1.0, 1.0));
        let Geodesic::Converged(km) = c.diagonal_km else {
            panic!("diagonal did not converge");
        };
        assert!((310.0..320.0).contains(&km), "got {km}");
    }

    #[test]
    fn distance_box_contains_circle() {
        let c = GeoPoint::new(45.0, 10.0);
        let r = 100_000.0;
        let (sw, ne) = bounds_of_distance(&c, r).unwrap();
        assert!(sw.lat < c.lat && c.lat < ne.lat);
        assert!(sw.lon < c.lon && c.lon < ne.lon);
        for step in 0..24 {
            let p = destination_point(&c, r * 0.999, step as f64 * 15.0, EARTH_RADIUS_M).unwrap();
            assert!(
                (sw.lat..=ne.lat).contains(&p.lat) && (sw.lon..=ne.lon).contains(&p.lon),
                "{p} outside {sw}..{ne}"
            );
        }
    }

    #[test]
    fn distance_box_over_pole() {
        let (sw, ne) = bounds_of_distance(&GeoPoint::new(89.9, 0.0), 50_000.0).unwrap();
        assert_eq!(ne.lat, 90.0);
        assert_eq!((sw.lon, ne.lon), (-180.0, 180.0));
        assert!(sw.lat < 89.9);
    }

    #[test]
    fn distance_box_across_date_line() {
        let (sw, ne) = bounds_of_distance(&GeoPoint::new(0.0, 179.9), 50_000.0).unwrap();
        assert!(sw.lon > ne.lon, "{sw} .. {ne}");
        assert!((179.4..179.5).contains(&sw.lon));
        assert!((-179.7..-179.6).contains(&ne.lon));
    }
}

// ── Polygon / circle ──────────────────────────────────────────────────────────

#[cfg(test)]
mod polygon {
    use gd_core::{GeoPoint, PointLike};

    use super::helpers::square;
    use crate::{point_in_circle, point_in_polygon, PreparedPolygon};

    #[test]
    fn inside_and_outside_square() {
        let p = PointLike::lat_lng(1.0, 1.0);
        assert!(point_in_polygon(&p, &square(0.0, 2.0)).unwrap());
        assert!(!point_in_polygon(&p, &square(3.0, 5.0)).unwrap());
    }

    #[test]
    fn reversed_ring_same_answer() {
        let mut ring = square(0.0, 2.0);
        ring.reverse();
        assert!(point_in_polygon(&GeoPoint::new(1.0, 1.0), &ring).unwrap());
        assert!(!point_in_polygon(&GeoPoint::new(3.0, 1.0), &ring).unwrap());
    }

    #[test]
    fn vertices_out_of_ring_order_form_a_bowtie() {
        let bowtie = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(2.0, 0.0),
        ];
        let p = GeoPoint::new(0.2, 0.5);
        assert!(point_in_polygon(&p, &square(0.0, 2.0)).unwrap());
        assert!(!point_in_polygon(&p, &bowtie).unwrap());
    }

    #[test]
    fn degenerate_rings() {
        let p = GeoPoint::new(0.0, 0.0);
        let empty: [GeoPoint; 0] = [];
        assert!(!point_in_polygon(&p, &empty).unwrap());
        assert!(!point_in_polygon(&p, &[GeoPoint::new(0.0, 0.0)]).unwrap());
    }

    #[test]
    fn prepared_matches_direct() {
        let triangle = [GeoPoint::new(0.0, 0.0), GeoPoint::new(4.0, 1.0), GeoPoint::new(1.0, 4.0)];
        let prepared = PreparedPolygon::new(&triangle).unwrap();
        for lat in 0..10 {
            for lon in 0..10 {
                let p = GeoPoint::new(lat as f64 * 0.5 - 0.25, lon as f64 * 0.5 - 0.25);
                assert_eq!(
                    prepared.contains(&p).unwrap(),
                    point_in_polygon(&p, &triangle).unwrap(),
                    "{p}"
                );
            }
        }
        assert_eq!(prepared.vertices().len(), 3);
    }

    #[test]
    fn circle_contains_its_center() {
        let c = GeoPoint::new(51.5, -0.12);
        assert!(point_in_circle(&c, &c, 1.0).unwrap());
    }

    #[test]
    fn circle_boundary_is_excluded() {
        let c = GeoPoint::new(0.0, 0.0);
        let p = GeoPoint::new(0.0, 1.0);
        assert!(!point_in_circle(&p, &c, 111_319.0).unwrap());
        assert!(point_in_circle(&p, &c, 111_320.0).unwrap());
    }

    #[test]
    fn non_convergent_is_outside() {
        let c = GeoPoint::new(0.0, 0.0);
        assert!(!point_in_circle(&GeoPoint::new(0.5, 179.7), &c, 1.0e9).unwrap());
    }
}

// ── Nearest ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use gd_core::{GeoError, GeoPoint, PointLike};
    use gd_metric::Geodesic;

    use crate::{find_nearest, order_by_distance, order_by_distance_keyed, Nearest};

    fn three() -> Vec<PointLike> {
        vec![
            PointLike::lat_lng(10.0, 10.0),
            PointLike::lat_lng(1.0, 1.0),
            PointLike::lat_lng(-5.0, -5.0),
        ]
    }

    #[test]
    fn nearest_of_three() {
        let origin = PointLike::lat_lng(0.0, 0.0);
        let Some(Nearest::Single(hit)) = find_nearest(&origin, &three(), 0, 1).unwrap() else {
            panic!("expected a single hit");
        };
        assert_eq!(hit.key, 1);
        assert_eq!(hit.point, GeoPoint::new(1.0, 1.0));
    }

    #[test]
    fn nearest_is_head_of_ordering() {
        let origin = GeoPoint::new(0.0, 0.0);
        let order = order_by_distance(&origin, &three()).unwrap();
        let nearest = find_nearest(&origin, &three(), 0, 1).unwrap().unwrap();
        assert_eq!(nearest, Nearest::Single(order[0].clone()));
        assert_eq!(order.iter().map(|o| o.key).collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn windows_and_limits() {
        let origin = GeoPoint::new(0.0, 0.0);
        let order = order_by_distance(&origin, &three()).unwrap();

        let Some(Nearest::Slice(window)) = find_nearest(&origin, &three(), 1, 5).unwrap() else {
            panic!("expected a slice");
        };
        assert_eq!(window, order[1..].to_vec());

        let zero = find_nearest(&origin, &three(), 2, 0).unwrap().unwrap();
        assert_eq!(zero, Nearest::Single(order[2].clone()));
        assert_eq!(zero.first().map(|o| o.key), Some(0));

        assert_eq!(find_nearest(&origin, &three(), 3, 1).unwrap(), None);
        let empty: [GeoPoint; 0] = [];
        assert_eq!(find_nearest(&origin, &empty, 0, 1).unwrap(), None);
    }

    #[test]
    fn ties_keep_input_order() {
        let origin = GeoPoint::new(0.0, 0.0);
        let points = [
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, -1.0),
            GeoPoint::new(0.0, 0.5),
            GeoPoint::new(0.0, 1.0),
        ];
        let keys: Vec<_> = order_by_distance(&origin, &points).unwrap().into_iter().map(|o| o.key).collect();
        assert_eq!(keys, vec![2, 0, 1, 3]);
    }

    #[test]
    fn non_convergent_sorts_last() {
        let origin = GeoPoint::new(0.0, 0.0);
        let points = [GeoPoint::new(0.5, 179.7), GeoPoint::new(10.0, 10.0)];
        let order = order_by_distance(&origin, &points).unwrap();
        assert_eq!(order[0].key, 1);
        assert_eq!(order[1].distance, Geodesic::NonConvergent);
    }

    #[test]
    fn keyed_collection() {
        let stops = [("depot", GeoPoint::new(0.0, 0.3)), ("market", GeoPoint::new(0.0, 0.1))];
        let order = order_by_distance_keyed(&GeoPoint::new(0.0, 0.0), stops.iter().map(|(k, p)| (*k, p))).unwrap();
        assert_eq!(order[0].key, "market");
        assert_eq!(order[1].key, "depot");
    }

    #[test]
    fn malformed_point_fails_query() {
        let points = vec![PointLike::lat_lng(1.0, 1.0), PointLike::object([("x", 1.0)])];
        let err = order_by_distance(&GeoPoint::new(0.0, 0.0), &points).unwrap_err();
        assert!(matches!(err, GeoError::InvalidFormat(_)), "{err:?}");
    }

    #[test]
    fn ordering_is_sorted_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        let origin = GeoPoint::new(rng.gen_range(-60.0..60.0), rng.gen_range(-180.0..180.0));
        let points: Vec<GeoPoint> = (0..200)
            .map(|_| GeoPoint::new(rng.gen_range(-89.0..89.0), rng.gen_range(-180.0..180.0)))
            .collect();

        let order = order_by_distance(&origin, &points).unwrap();
        assert!(order.windows(2).all(|w| w[0].distance.sort_key() <= w[1].distance.sort_key()));

        let mut keys: Vec<_> = order.iter().map(|o| o.key).collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..points.len()).collect::<Vec<_>>());
        assert!(order.iter().all(|o| o.point == points[o.key]));
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use gd_core::{GeoError, GeoPoint, Unit};
    use gd_metric::Geodesic;

    use crate::{
        distance_from_line, is_point_in_line, is_point_near_line, path_length, speed, SpeedUnit,
        TimedPoint,
    };

    #[test]
    fn length_of_short_inputs() {
        let empty: [GeoPoint; 0] = [];
        assert_eq!(path_length(&empty).unwrap(), Geodesic::Converged(0.0));
        assert_eq!(path_length(&[GeoPoint::new(5.0, 5.0)]).unwrap(), Geodesic::Converged(0.0));
    }

    #[test]
    fn length_sums_legs_in_order() {
        let route = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 2.0)];
        assert_eq!(path_length(&route).unwrap(), Geodesic::Converged(222_638.0));

        let back_and_forth = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 2.0), GeoPoint::new(0.0, 1.0)];
        assert_eq!(path_length(&back_and_forth).unwrap(), Geodesic::Converged(333_958.0));
    }

    #[test]
    fn closed_loop_includes_return_leg() {
        let open = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)];
        let mut closed = open.to_vec();
        closed.push(open[0]);
        assert_eq!(path_length(&open).unwrap(), Geodesic::Converged(111_319.0));
        assert_eq!(path_length(&closed).unwrap(), Geodesic::Converged(222_638.0));
    }

    #[test]
    fn non_convergent_leg_poisons_length() {
        let route = [GeoPoint::new(1.0, 1.0), GeoPoint::new(0.0, 0.0), GeoPoint::new(0.5, 179.7)];
        assert_eq!(path_length(&route).unwrap(), Geodesic::NonConvergent);
    }

    #[test]
    fn speed_per_hour() {
        let a = TimedPoint::new(GeoPoint::new(0.0, 0.0), 0);
        let b = TimedPoint::new(GeoPoint::new(0.0, 1.0), 3_600_000);
        assert_eq!(speed(&a, &b, SpeedUnit::default()).unwrap(), Geodesic::Converged(111.319));
        assert_eq!(
            speed(&a, &b, "mph".parse().unwrap()).unwrap(),
            Geodesic::Converged(Unit::Miles.convert(111_319.0, 4))
        );

        let half = TimedPoint::new(GeoPoint::new(0.0, 1.0), 1_800_000);
        assert_eq!(speed(&a, &half, "kmh".parse().unwrap()).unwrap(), Geodesic::Converged(222.638));
    }

    #[test]
    fn zero_timespan_is_an_error() {
        let a = TimedPoint::new(GeoPoint::new(0.0, 0.0), 1_000);
        let b = TimedPoint::new(GeoPoint::new(0.0, 1.0), 1_000);
        assert_eq!(speed(&a, &b, SpeedUnit::default()), Err(GeoError::InvalidTimespan));
    }

    #[test]
    fn overflowing_timespan_is_an_error() {
        let a = TimedPoint::new(GeoPoint::new(0.0, 0.0), i64::MIN);
        let b = TimedPoint::new(GeoPoint::new(0.0, 1.0), i64::MAX);
        assert_eq!(speed(&a, &b, SpeedUnit::default()), Err(GeoError::InvalidTimespan));
        assert_eq!(speed(&b, &a, SpeedUnit::default()), Err(GeoError::InvalidTimespan));
    }

    #[test]
    fn speed_unit_aliases() {
        assert_eq!("kmh".parse::<SpeedUnit>().unwrap(), SpeedUnit(Unit::Kilometers));
        assert_eq!("mph".parse::<SpeedUnit>().unwrap(), SpeedUnit(Unit::Miles));
        assert_eq!("sm".parse::<SpeedUnit>().unwrap(), SpeedUnit(Unit::NauticalMiles));
        assert!(matches!("parsec".parse::<SpeedUnit>(), Err(GeoError::UnknownUnit(_))));
    }

    #[test]
    fn distance_to_segment() {
        let (s, e) = (GeoPoint::new(0.0, -1.0), GeoPoint::new(0.0, 1.0));

        let above = distance_from_line(&GeoPoint::new(1.0, 0.0), &s, &e).unwrap().value().unwrap();
        assert!((above - 110_574.0).abs() < 500.0, "got {above}");

        let past_end = distance_from_line(&GeoPoint::new(0.0, 2.0), &s, &e).unwrap();
        assert_eq!(past_end, Geodesic::Converged(111_319.491));

        let on = distance_from_line(&GeoPoint::new(0.0, 0.5), &s, &e).unwrap().value().unwrap();
        assert!(on < 20.0, "got {on}");
        assert_eq!(distance_from_line(&s, &s, &e).unwrap(), Geodesic::Converged(0.0));
    }

    #[test]
    fn near_and_in_line() {
        let (s, e) = (GeoPoint::new(0.0, -1.0), GeoPoint::new(0.0, 1.0));
        assert!(is_point_near_line(&GeoPoint::new(0.0, 0.5), &s, &e, 50.0).unwrap());
        assert!(is_point_near_line(&GeoPoint::new(0.01, 0.5), &s, &e, 1_200.0).unwrap());
        assert!(!is_point_near_line(&GeoPoint::new(0.1, 0.5), &s, &e, 1_200.0).unwrap());

        assert!(is_point_in_line(&GeoPoint::new(0.0, 0.5), &s, &e).unwrap());
        assert!(!is_point_in_line(&GeoPoint::new(0.01, 0.5), &s, &e).unwrap());
        assert!(!is_point_in_line(&GeoPoint::new(0.0, 1.5), &s, &e).unwrap());
    }
}

// ── Index ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use gd_core::GeoPoint;

    use crate::{point_in_circle, PointIndex};

    #[test]
    fn radius_query() {
        let stops = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.005),
            GeoPoint::new(0.0, 0.01),
            GeoPoint::new(0.0, 0.02),
            GeoPoint::new(1.0, 1.0),
        ];
        let index = PointIndex::new(&stops).unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(index.point(4), Some(&GeoPoint::new(1.0, 1.0)));

        let hits = index.within_radius(&GeoPoint::new(0.0, 0.0), 1_000.0).unwrap();
        assert_eq!(hits.iter().map(|h| h.key).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn agrees_with_point_in_circle() {
        let stops: Vec<GeoPoint> = (0..20)
            .flat_map(|i| (0..20).map(move |j| GeoPoint::new(50.0 + i as f64 * 0.01, 8.0 + j as f64 * 0.015)))
            .collect();
        let center = GeoPoint::new(50.1, 8.15);
        let index = PointIndex::new(&stops).unwrap();

        let mut from_index: Vec<_> = index.within_radius(&center, 5_000.0).unwrap().into_iter().map(|h| h.key).collect();
        from_index.sort_unstable();
        let brute: Vec<_> = (0..stops.len())
            .filter(|&k| point_in_circle(&stops[k], &center, 5_000.0).unwrap())
            .collect();
        assert_eq!(from_index, brute);
        assert!(!brute.is_empty());
    }

    #[test]
    fn random_queries_agree_with_point_in_circle() {
        let mut rng = SmallRng::seed_from_u64(0x51A7);
        for _ in 0..100 {
            let center = GeoPoint::new(rng.gen_range(-89.9..89.9), rng.gen_range(-180.0..180.0));
            let radius_m = rng.gen_range(1_000.0..2_000_000.0);
            let spread = 40.0;
            let stops: Vec<GeoPoint> = (0..200)
                .map(|_| {
                    let lat = (center.lat + rng.gen_range(-spread..spread)).clamp(-90.0, 90.0);
                    let mut lon = center.lon + rng.gen_range(-spread..spread);
                    if lon > 180.0 {
                        lon -= 360.0;
                    } else if lon < -180.0 {
                        lon += 360.0;
                    }
                    GeoPoint::new(lat, lon)
                })
                .collect();
            let index = PointIndex::new(&stops).unwrap();

            let mut from_index: Vec<_> =
                index.within_radius(&center, radius_m).unwrap().into_iter().map(|h| h.key).collect();
            from_index.sort_unstable();
            let brute: Vec<_> = (0..stops.len())
                .filter(|&k| point_in_circle(&stops[k], &center, radius_m).unwrap())
                .collect();
            assert_eq!(from_index, brute, "center {center}, radius {radius_m} m");
        }
    }

    #[test]
    fn across_date_line() {
        let stops = [GeoPoint::new(0.0, 179.995), GeoPoint::new(0.0, -179.995), GeoPoint::new(0.0, 170.0)];
        let index = PointIndex::new(&stops).unwrap();
        let hits = index.within_radius(&GeoPoint::new(0.0, 179.999), 2_000.0).unwrap();
        assert_eq!(hits.iter().map(|h| h.key).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn near_pole() {
        let stops = [GeoPoint::new(89.99, 120.0), GeoPoint::new(89.995, -170.0), GeoPoint::new(89.0, 0.0)];
        let index = PointIndex::new(&stops).unwrap();
        let hits = index.within_radius(&GeoPoint::new(89.99, 0.0), 5_000.0).unwrap();
        assert_eq!(hits.iter().map(|h| h.key).collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn empty_index() {
        let none: [GeoPoint; 0] = [];
        let index = PointIndex::new(&none).unwrap();
        assert!(index.is_empty());
        assert!(index.within_radius(&GeoPoint::new(0.0, 0.0), 1_000.0).unwrap().is_empty());
    }
}
