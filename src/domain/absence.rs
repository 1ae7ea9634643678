use crate::domain::parameters::{ensure_finite, ParameterError};

/// Upper bounds of buckets 0..=3 of the plant's historical absence table.
/// Draws at or above the last bound fall into bucket 4.
pub const FIXED_BREAKPOINTS: [f64; 4] = [0.36, 0.74, 0.93, 0.99];

const PERCENTAGE_SUM_TOLERANCE: f64 = 1e-9;

/// Categorical distribution of the number of absent workers on a day.
#[derive(Debug, Clone, PartialEq)]
pub enum AbsenceModel {
    /// 0..=4 absentees with probabilities 36/38/19/6/1 %.
    Fixed,
    /// 0..=5 absentees with caller supplied percentages `p0..p5`.
    Percentages([f64; 6]),
}

impl AbsenceModel {
    /// Maps a uniform draw in `[0, 1)` to an absentee count.
    ///
    /// Each bucket's upper bound is exclusive, so a draw equal to a
    /// breakpoint belongs to the next bucket. The last bucket takes
    /// everything the earlier ones did not.
    pub fn bucket_for(&self, draw: f64) -> u32 {
        match self {
            AbsenceModel::Fixed => bucket_in(FIXED_BREAKPOINTS.iter().copied(), draw),
            AbsenceModel::Percentages(percentages) => {
                bucket_in(cumulative_breakpoints(percentages), draw)
            }
        }
    }

    /// Largest absentee count the model can produce.
    pub fn max_absentees(&self) -> u32 {
        match self {
            AbsenceModel::Fixed => FIXED_BREAKPOINTS.len() as u32,
            AbsenceModel::Percentages(percentages) => percentages.len() as u32 - 1,
        }
    }

    pub fn breakpoints(&self) -> Vec<f64> {
        match self {
            AbsenceModel::Fixed => FIXED_BREAKPOINTS.to_vec(),
            AbsenceModel::Percentages(percentages) => {
                cumulative_breakpoints(percentages).collect()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let AbsenceModel::Percentages(percentages) = self else {
            return Ok(());
        };
        for (bucket, value) in percentages.iter().enumerate() {
            ensure_finite("absence_percentages", *value)?;
            if *value < 0.0 {
                return Err(ParameterError::NegativePercentage {
                    bucket,
                    value: *value,
                });
            }
        }
        let total: f64 = percentages.iter().sum();
        if (total - 100.0).abs() > PERCENTAGE_SUM_TOLERANCE {
            return Err(ParameterError::PercentageSum(total));
        }
        Ok(())
    }
}

fn cumulative_breakpoints(percentages: &[f64; 6]) -> impl Iterator<Item = f64> + '_ {
    percentages[..percentages.len() - 1]
        .iter()
        .scan(0.0, |running, value| {
            *running += value;
            Some(*running / 100.0)
        })
}

fn bucket_in(breakpoints: impl Iterator<Item = f64>, draw: f64) -> u32 {
    let mut bucket = 0;
    for upper in breakpoints {
        if draw < upper {
            return bucket;
        }
        bucket += 1;
    }
    bucket
}
