/// First order low pass filter at a fixed sample rate.
pub struct LowPassFilter {
    output: f32,
    alpha: f32,
    cutoff_freq: f32,
    is_initialised: bool,
}

impl LowPassFilter {
    pub fn with_sample_rate_and_cutoff(sample_freq: f32, cutoff_freq: f32) -> Self {
        Self {
            output: 0.,
            alpha: compute_alpha(sample_freq, cutoff_freq),
            cutoff_freq,
            is_initialised: false,
        }
    }

    pub fn output(&self) -> f32 {
        self.output
    }

    pub fn cutoff_freq(&self) -> f32 {
        self.cutoff_freq
    }

    pub fn is_initialised(&self) -> bool {
        self.is_initialised
    }

    /// Filter a sample. The first sample passes through unchanged.
    pub fn apply(&mut self, sample: f32) -> f32 {
        self.output = if self.is_initialised {
            sample * self.alpha + self.output * (1. - self.alpha)
        } else {
            self.is_initialised = true;
            sample
        };
        self.output
    }

    pub fn reset(&mut self, value: f32) {
        self.is_initialised = true;
        self.output = value;
    }
}

fn compute_alpha(sample_freq: f32, cutoff_freq: f32) -> f32 {
    if sample_freq <= 0. || cutoff_freq <= 0. {
        // No filtering
        return 1.;
    }
    let dt = 1.0 / sample_freq;
    let rc = 1.0 / (2.0 * core::f32::consts::PI * cutoff_freq);
    dt / (dt + rc)
}
