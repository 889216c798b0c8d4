use ndarray::ArrayView1;

use crate::{MlErr, Result};

fn check_lengths(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    if y_true.is_empty() {
        return Err(MlErr::EmptyDataset { what: "target" });
    }

    Ok(())
}

/// Mean squared error between the targets and the predictions.
pub fn mean_squared_error(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let sse: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    Ok(sse / y_true.len() as f64)
}

/// Coefficient of determination of the predictions.
///
/// A constant target gives `1.0` when predicted perfectly and `0.0` otherwise.
pub fn r2_score(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let mean = y_true.sum() / y_true.len() as f64;
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn perfect_prediction() {
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(r2_score(y.view(), y.view()).unwrap(), 1.0);
        assert_eq!(mean_squared_error(y.view(), y.view()).unwrap(), 0.0);
    }

    #[test]
    fn mean_prediction_scores_zero() {
        let y = array![1.0, 2.0, 3.0];
        let p = array![2.0, 2.0, 2.0];
        assert!(r2_score(y.view(), p.view()).unwrap().abs() < 1e-12);
        assert!((mean_squared_error(y.view(), p.view()).unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn worse_than_mean_is_negative() {
        let y = array![1.0, 2.0, 3.0];
        let p = array![3.0, 2.0, 1.0];
        assert!((r2_score(y.view(), p.view()).unwrap() + 3.0).abs() < 1e-12);
    }

    #[test]
    fn constant_target() {
        let y = array![4.0, 4.0];
        assert_eq!(r2_score(y.view(), array![4.0, 4.0].view()).unwrap(), 1.0);
        assert_eq!(r2_score(y.view(), array![4.0, 5.0].view()).unwrap(), 0.0);
    }

    #[test]
    fn length_mismatch() {
        let y = array![1.0, 2.0];
        let p = array![1.0];
        assert!(matches!(
            r2_score(y.view(), p.view()),
            Err(MlErr::SizeMismatch { got: 1, expected: 2, .. })
        ));
    }
}
