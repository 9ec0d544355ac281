use super::{PulseCapture, Sonar};

/// Round trip echo time (in microseconds) per centimetre of range.
const ECHO_US_PER_CM: u16 = 58;

/// Longest range an ultrasonic module reports reliably.
pub const MAX_RANGE_CM: u16 = 400;

/// Ultrasonic rangefinders measured by echo pulse width.
pub struct EchoSonar<'a, const N: usize> {
    echoes: &'a PulseCapture<N>,
    enabled: [bool; N],
    distance_cm: [u16; N],
}

impl<'a, const N: usize> EchoSonar<'a, N> {
    pub fn new(echoes: &'a PulseCapture<N>) -> Self {
        Self {
            echoes,
            enabled: [false; N],
            distance_cm: [0; N],
        }
    }
}

impl<const N: usize> Sonar for EchoSonar<'_, N> {
    fn sonar_init(&mut self, index: u8) -> bool {
        match self.enabled.get_mut(index as usize) {
            Some(enabled) => {
                *enabled = true;
                true
            }
            None => false,
        }
    }

    fn sonar_update(&mut self, index: u8) {
        let index = index as usize;
        if !self.enabled.get(index).copied().unwrap_or(false) {
            return;
        }

        let distance = self.echoes.width(index) / ECHO_US_PER_CM;
        // No echo inside the usable range reads as nothing in front
        self.distance_cm[index] = if distance > MAX_RANGE_CM { 0 } else { distance };
    }

    fn sonar_distance(&self, index: u8) -> u16 {
        self.distance_cm.get(index as usize).copied().unwrap_or(0)
    }
}
