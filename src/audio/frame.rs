use std::ops::{AddAssign, Mul};

// One stereo frame, the unit the engine mixes in
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub fn mono(x: f32) -> Self {
        Self { left: x, right: x }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            left: self.left * (1.0 - t) + other.left * t,
            right: self.right * (1.0 - t) + other.right * t,
        }
    }

    // hard limit before handing samples to the device
    pub fn clipped(self) -> Self {
        Self {
            left: self.left.clamp(-1.0, 1.0),
            right: self.right.clamp(-1.0, 1.0),
        }
    }
}

impl AddAssign for StereoFrame {
    fn add_assign(&mut self, rhs: Self) {
        self.left += rhs.left;
        self.right += rhs.right;
    }
}

impl Mul<f32> for StereoFrame {
    type Output = Self;

    fn mul(self, gain: f32) -> Self {
        Self { left: self.left * gain, right: self.right * gain }
    }
}
