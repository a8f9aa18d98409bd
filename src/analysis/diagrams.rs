//! Shear and bending moment diagrams
//!
//! Each span is sampled at evenly spaced points over `[0, L]`. The value at a
//! point is the clamped-span contribution of its loads plus a correction from
//! the recovered end forces: a constant for shear, a straight line between
//! the two end moments for bending.

use serde::{Deserialize, Serialize};

use super::AnalysisOptions;
use crate::elements::BeamElement;
use crate::error::{BeamError, BeamResult};
use crate::loads::Load;
use crate::math::Vec4;

/// A peak value and where it occurs, measured from the left end of its span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    pub value: f64,
    pub x: f64,
}

/// Sampled diagram of one span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanDiagram {
    /// Span index
    pub span: usize,
    /// Distance from the left end of the beam to the left end of this span
    pub offset: f64,
    /// Sample positions along the span
    pub x: Vec<f64>,
    /// Diagram values at each sample
    pub values: Vec<f64>,
    /// Largest value; the leftmost sample wins a tie
    pub max: Extremum,
    /// Smallest value; the leftmost sample wins a tie
    pub min: Extremum,
}

impl SpanDiagram {
    fn from_samples(span: usize, offset: f64, x: Vec<f64>, values: Vec<f64>) -> Self {
        let mut max = Extremum { value: values[0], x: x[0] };
        let mut min = max;

        for (&xi, &v) in x.iter().zip(&values).skip(1) {
            if v > max.value {
                max = Extremum { value: v, x: xi };
            }
            if v < min.value {
                min = Extremum { value: v, x: xi };
            }
        }

        Self { span, offset, x, values, max, min }
    }

    /// Sample positions measured from the left end of the beam
    pub fn global_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.values)
            .map(move |(&x, &v)| (self.offset + x, v))
    }

    /// Largest absolute value and its location
    pub fn abs_max(&self) -> Extremum {
        if self.min.value.abs() > self.max.value.abs() {
            self.min
        } else {
            self.max
        }
    }
}

/// Evenly spaced points over `[0, length]`, both ends included
pub fn linspace(length: f64, n: usize) -> Vec<f64> {
    let last = (n - 1) as f64;
    (0..n)
        .map(|k| if k + 1 == n { length } else { length * k as f64 / last })
        .collect()
}

/// Shear force diagrams for every span
pub fn shears(
    elements: &[BeamElement],
    loads: &[Vec<Load>],
    forces: &[Vec4],
    options: &AnalysisOptions,
) -> BeamResult<Vec<SpanDiagram>> {
    sample_spans(elements, loads, forces, options, |span_loads, f, x, length| {
        let q0: f64 = span_loads.iter().map(|load| load.shear(x, length)).sum();
        q0 + f[0]
    })
    .map(|diagrams| {
        for d in &diagrams {
            log::debug!(
                "span {} shear: max {:.3} at {:.3}, min {:.3} at {:.3}",
                d.span, d.max.value, d.max.x, d.min.value, d.min.x
            );
        }
        diagrams
    })
}

/// Bending moment diagrams for every span, in the configured sign convention
pub fn moments(
    elements: &[BeamElement],
    loads: &[Vec<Load>],
    forces: &[Vec4],
    options: &AnalysisOptions,
) -> BeamResult<Vec<SpanDiagram>> {
    let convention = options.moment_convention;
    sample_spans(elements, loads, forces, options, |span_loads, f, x, length| {
        let m0: f64 = span_loads.iter().map(|load| load.moment(x, length)).sum();
        let m1 = -f[1] + (f[3] + f[1]) / length * x;
        convention.apply(m0 + m1)
    })
    .map(|diagrams| {
        for d in &diagrams {
            log::debug!(
                "span {} moment: max {:.3} at {:.3}, min {:.3} at {:.3}",
                d.span, d.max.value, d.max.x, d.min.value, d.min.x
            );
        }
        diagrams
    })
}

fn sample_spans<F>(
    elements: &[BeamElement],
    loads: &[Vec<Load>],
    forces: &[Vec4],
    options: &AnalysisOptions,
    value_at: F,
) -> BeamResult<Vec<SpanDiagram>>
where
    F: Fn(&[Load], &Vec4, f64, f64) -> f64,
{
    if options.resolution < 2 {
        return Err(BeamError::DimensionMismatch(format!(
            "diagram resolution must be at least 2, got {}",
            options.resolution
        )));
    }
    if loads.len() != elements.len() || forces.len() != elements.len() {
        return Err(BeamError::DimensionMismatch(format!(
            "{} spans, {} load lists and {} end force vectors",
            elements.len(),
            loads.len(),
            forces.len()
        )));
    }

    let mut offset = 0.0;
    let mut diagrams = Vec::with_capacity(elements.len());

    for (span, ((element, span_loads), f)) in elements.iter().zip(loads).zip(forces).enumerate() {
        let length = element.length();
        let x = linspace(length, options.resolution);
        let values = x.iter().map(|&xi| value_at(span_loads.as_slice(), f, xi, length)).collect();

        diagrams.push(SpanDiagram::from_samples(span, offset, x, values));
        offset += length;
    }

    Ok(diagrams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MomentConvention;
    use crate::loads::{ConcentratedMoment, DistributedLoad, PointLoad};
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_hits_both_ends() {
        let x = linspace(0.3, 4);
        assert_eq!(x.len(), 4);
        assert_eq!(x[0], 0.0);
        assert_eq!(x[3], 0.3);
        assert_relative_eq!(x[1], 0.1, epsilon = 1e-15);
    }

    #[test]
    fn test_ties_resolve_to_first_sample() {
        let d = SpanDiagram::from_samples(
            0,
            0.0,
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, 5.0, 5.0, 1.0],
        );
        assert_eq!(d.max, Extremum { value: 5.0, x: 1.0 });
        assert_eq!(d.min, Extremum { value: 1.0, x: 0.0 });
    }

    #[test]
    fn test_simple_span_uniform_load() {
        // End forces of a simply supported span: qL/2 up at each end, no end moments
        let (q, l) = (2_000.0, 6.0);
        let elements = [BeamElement::new(200e9, 1e-4, l).unwrap()];
        let loads = vec![vec![Load::from(DistributedLoad::full_span(q, l))]];
        let forces = [Vec4::new(q * l / 2.0, 0.0, q * l / 2.0, 0.0)];
        let options = AnalysisOptions::default().with_resolution(101);

        let m = moments(&elements, &loads, &forces, &options).unwrap();
        assert_relative_eq!(m[0].max.value, q * l * l / 8.0, max_relative = 1e-9);
        assert_relative_eq!(m[0].max.x, l / 2.0, epsilon = 1e-12);

        let v = shears(&elements, &loads, &forces, &options).unwrap();
        assert_relative_eq!(v[0].max.value, q * l / 2.0, max_relative = 1e-12);
        assert_relative_eq!(v[0].min.value, -q * l / 2.0, max_relative = 1e-12);
        assert_eq!(v[0].min.x, l);
    }

    #[test]
    fn test_hogging_convention_flips_samples_and_extrema() {
        let l = 4.0;
        let elements = [BeamElement::new(200e9, 1e-4, l).unwrap()];
        let loads = vec![vec![Load::from(PointLoad::new(1_000.0, 2.0))]];
        let forces = [Vec4::new(500.0, 0.0, 500.0, 0.0)];
        let sagging = AnalysisOptions::default().with_resolution(5);
        let hogging = sagging.clone().with_moment_convention(MomentConvention::HoggingPositive);

        let s = moments(&elements, &loads, &forces, &sagging).unwrap();
        let h = moments(&elements, &loads, &forces, &hogging).unwrap();

        for (a, b) in s[0].values.iter().zip(&h[0].values) {
            assert_eq!(*a, -*b);
        }
        assert_relative_eq!(s[0].max.value, 1_000.0, max_relative = 1e-12);
        assert_relative_eq!(h[0].min.value, -1_000.0, max_relative = 1e-12);
        assert_eq!(s[0].max.x, h[0].min.x);
    }

    #[test]
    fn test_moment_only_shear_is_constant() {
        let elements = [BeamElement::new(200e9, 1e-4, 5.0).unwrap()];
        let loads = vec![vec![Load::from(ConcentratedMoment::new(300.0, 2.0))]];
        let forces = [Vec4::new(-60.0, 0.0, 60.0, 0.0)];
        let options = AnalysisOptions::default().with_resolution(50);

        let v = shears(&elements, &loads, &forces, &options).unwrap();
        assert!(v[0].values.iter().all(|&s| s == -60.0));
    }

    #[test]
    fn test_offsets_accumulate() {
        let elements = [
            BeamElement::new(200e9, 1e-4, 3.0).unwrap(),
            BeamElement::new(200e9, 1e-4, 5.0).unwrap(),
        ];
        let loads = vec![vec![], vec![]];
        let forces = [Vec4::zeros(), Vec4::zeros()];
        let options = AnalysisOptions::default().with_resolution(3);

        let v = shears(&elements, &loads, &forces, &options).unwrap();
        assert_eq!(v[1].offset, 3.0);
        let xs: Vec<f64> = v[1].global_points().map(|(x, _)| x).collect();
        assert_eq!(xs, vec![3.0, 5.5, 8.0]);
    }

    #[test]
    fn test_resolution_must_allow_both_ends() {
        let elements = [BeamElement::new(200e9, 1e-4, 3.0).unwrap()];
        let options = AnalysisOptions::default().with_resolution(1);

        let err = shears(&elements, &[vec![]], &[Vec4::zeros()], &options).unwrap_err();
        assert!(matches!(err, BeamError::DimensionMismatch(_)));
    }
}
