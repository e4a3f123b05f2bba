//! Mini-batch SGD with classical momentum.

/// Momentum buffers for a weight vector plus a bias.
///
/// This is the only optimizer state; resetting it leaves the model's
/// parameters untouched.
#[derive(Debug, Clone)]
pub struct MomentumSgd {
    learning_rate: f64,
    momentum: f64,
    velocity: Vec<f64>,
    bias_velocity: f64,
    steps: u64,
}

impl MomentumSgd {
    pub fn new(dimension: usize, learning_rate: f64, momentum: f64) -> Self {
        Self {
            learning_rate,
            momentum,
            velocity: vec![0.0; dimension],
            bias_velocity: 0.0,
            steps: 0,
        }
    }

    /// Apply one update: `v = momentum * v + grad; param -= lr * v`.
    pub fn step(&mut self, weights: &mut [f64], bias: &mut f64, grad: &[f64], bias_grad: f64) {
        for ((w, v), g) in weights.iter_mut().zip(self.velocity.iter_mut()).zip(grad) {
            *v = self.momentum * *v + g;
            *w -= self.learning_rate * *v;
        }
        self.bias_velocity = self.momentum * self.bias_velocity + bias_grad;
        *bias -= self.learning_rate * self.bias_velocity;
        self.steps += 1;
    }

    /// Zero the momentum buffers.
    pub fn reset(&mut self) {
        self.velocity.iter_mut().for_each(|v| *v = 0.0);
        self.bias_velocity = 0.0;
        self.steps = 0;
    }

    /// Updates applied since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_fresh(&self) -> bool {
        self.steps == 0 && self.bias_velocity == 0.0 && self.velocity.iter().all(|&v| v == 0.0)
    }
}
