//! Index-aligned elementwise maps over a sweep.
//!
//! With the `parallel` feature the map runs on the rayon pool; otherwise it
//! is a plain iterator. Output order always matches the index order.

use crate::error::Result;

#[cfg(feature = "parallel")]
pub(crate) fn map_indexed<T, F>(len: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    use rayon::prelude::*;
    (0..len).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_indexed<T, F>(len: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    (0..len).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_preserves_index_order() {
        let out = map_indexed(1000, |i| Ok(i * 2)).unwrap();
        assert_eq!(out.len(), 1000);
        for (i, v) in out.iter().enumerate() {
            assert_eq!(*v, i * 2);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_rayon_sweep_matches_sequential_evaluation() {
        use crate::{absorption, impedance, FrequencySweep, MaterialParameters, ModelVariant};

        let material = MaterialParameters::default();
        let sweep = FrequencySweep::default();
        let z0 = material.air_impedance();
        for variant in ModelVariant::ALL {
            let imp = impedance::evaluate(&material, &sweep, variant).unwrap();
            let alpha =
                absorption::evaluate(&imp.characteristic_impedance, &imp.wave_number, 0.05, z0)
                    .unwrap();

            let sequential: Vec<_> = sweep
                .iter()
                .map(|&f| impedance::evaluate_at(&material, f, variant))
                .collect();
            assert_eq!(imp.len(), sequential.len());
            for (i, &(zc, kc)) in sequential.iter().enumerate() {
                assert_eq!(imp.characteristic_impedance[i], zc, "{variant} zc at bin {i}");
                assert_eq!(imp.wave_number[i], kc, "{variant} kc at bin {i}");
                let a = absorption::evaluate_at(i, zc, kc, 0.05, z0).unwrap();
                assert_eq!(alpha[i], a, "{variant} alpha at bin {i}");
            }
        }
    }

    #[test]
    fn test_any_error_fails_whole_map() {
        let out: Result<Vec<usize>> = map_indexed(100, |i| {
            if i == 42 {
                Err(Error::NumericSingularity {
                    index: i,
                    quantity: "test",
                })
            } else {
                Ok(i)
            }
        });
        assert!(matches!(
            out,
            Err(Error::NumericSingularity { index: 42, .. })
        ));
    }
}
