//! Surface material properties and the rule for combining two bodies' worth
//! of them into one contact's coefficients.

/// Friction and restitution (bounciness) of a body's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub friction: f32,
    pub bounciness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.3,
            bounciness: 0.0,
        }
    }
}

impl Material {
    #[must_use]
    pub fn new(friction: f32, bounciness: f32) -> Self {
        Self { friction, bounciness }
    }
}

/// Combines two per-body coefficients (friction or bounciness) into one
/// contact-level value: a negative coefficient means "defer to the other
/// body's value"; otherwise the geometric mean is used.
#[must_use]
pub fn combine(a: f32, b: f32) -> f32 {
    if a < 0.0 {
        b
    } else if b < 0.0 {
        a
    } else {
        (a * b).sqrt()
    }
}

#[must_use]
pub fn combine_materials(a: &Material, b: &Material) -> Material {
    Material {
        friction: combine(a.friction, b.friction),
        bounciness: combine(a.bounciness, b.bounciness),
    }
}
