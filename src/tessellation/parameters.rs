/// Returns `n_steps + 1` evenly spaced parameters from 0 to 1 inclusive.
///
/// `n_steps == 0` yields the single parameter `0.0`.
#[must_use]
pub fn uniform_parameters(n_steps: usize) -> Vec<f64> {
    if n_steps == 0 {
        return vec![0.0];
    }
    #[allow(clippy::cast_precision_loss)]
    let steps = n_steps as f64;
    (0..=n_steps)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let i = i as f64;
            i / steps
        })
        .collect()
}
