//! Dual-light Phong lighting
//!
//! Defines the light and ambient configuration the frame renderer feeds the
//! GPU each frame, plus [`shade`], the plain-Rust evaluation of the fragment
//! contract that `phong.wgsl` implements. Keeping the math in one testable
//! place pins down the additive two-light combination and the output clamp.

use cgmath::{ElementWise, InnerSpace, Vector3, Zero};

/// A point light: position and color in world space.
#[derive(Copy, Clone, Debug)]
pub struct Light {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Ambient lighting shared by every light.
#[derive(Copy, Clone, Debug)]
pub struct Ambient {
    pub color: [f32; 3],
    pub strength: f32,
}

/// Frame-level lighting: exactly two point lights plus ambient.
///
/// The shading math generalizes to any number of lights (see [`shade`]);
/// the rendered scene fixes two.
#[derive(Copy, Clone, Debug)]
pub struct LightingConfig {
    pub ambient: Ambient,
    pub lights: [Light; 2],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: Ambient {
                // White ambient color leaves the per-light ambient term as
                // strength * light color.
                color: [1.0, 1.0, 1.0],
                strength: 0.1,
            },
            lights: [
                Light {
                    position: [-15.0, 2.5, -10.0],
                    color: [1.0, 0.95, 0.85], // slightly warm white
                },
                Light {
                    position: [15.0, 20.0, -15.0],
                    color: [1.0, 0.95, 0.85],
                },
            ],
        }
    }
}

/// Per-light specular response of a material.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpecularParams {
    pub intensity: f32,
    pub highlight_size: f32,
}

/// The shaded point as the fragment stage sees it.
///
/// `base_color` is the modulation source already chosen by the caller:
/// the sampled texture color when the material has a texture, otherwise
/// the material's flat color.
#[derive(Copy, Clone, Debug)]
pub struct Surface {
    pub world_position: [f32; 3],
    pub normal: [f32; 3],
    pub view_position: [f32; 3],
    pub base_color: [f32; 3],
}

fn reflect(incident: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Evaluates the Phong fragment contract for one surface point.
///
/// For each light: ambient (strength x ambient color x light color),
/// diffuse (Lambert), and specular (Phong reflection) are summed, modulated
/// by the surface base color, and the per-light results are *added* across
/// lights. Overlap regions therefore brighten rather than average. The
/// final color clamps to [0,1] per channel, alpha is 1.
pub fn shade(surface: &Surface, ambient: &Ambient, lights: &[(Light, SpecularParams)]) -> [f32; 4] {
    let normal = Vector3::from(surface.normal).normalize();
    let world_position = Vector3::from(surface.world_position);
    let view_dir = (Vector3::from(surface.view_position) - world_position).normalize();
    let base_color = Vector3::from(surface.base_color);
    let ambient_color = Vector3::from(ambient.color);

    let mut color = Vector3::zero();
    for (light, specular) in lights {
        let light_color = Vector3::from(light.color);
        let light_dir = (Vector3::from(light.position) - world_position).normalize();

        let ambient_term = ambient.strength * ambient_color.mul_element_wise(light_color);
        let diffuse = normal.dot(light_dir).max(0.0) * light_color;
        let reflect_dir = reflect(-light_dir, normal);
        let highlight = view_dir.dot(reflect_dir).max(0.0).powf(specular.highlight_size);
        let specular_term = specular.intensity * highlight * light_color;

        color += (ambient_term + diffuse + specular_term).mul_element_wise(base_color);
    }

    [
        color.x.clamp(0.0, 1.0),
        color.y.clamp(0.0, 1.0),
        color.z.clamp(0.0, 1.0),
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn head_on_light(color: [f32; 3]) -> (Light, SpecularParams) {
        (
            Light {
                position: [0.0, 0.0, 10.0],
                color,
            },
            SpecularParams {
                intensity: 1.0,
                highlight_size: 25.0,
            },
        )
    }

    fn white_ambient(strength: f32) -> Ambient {
        Ambient {
            color: [1.0, 1.0, 1.0],
            strength,
        }
    }

    fn facing_surface() -> Surface {
        Surface {
            world_position: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            view_position: [0.0, 0.0, 10.0],
            base_color: [1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn two_identical_lights_double_the_single_light_result() {
        // Dim lights keep the doubled sum below the clamp.
        let light = head_on_light([0.2, 0.15, 0.1]);
        let surface = facing_surface();
        let ambient = white_ambient(0.1);

        let single = shade(&surface, &ambient, &[light]);
        let double = shade(&surface, &ambient, &[light, light]);
        for channel in 0..3 {
            assert!((double[channel] - 2.0 * single[channel]).abs() < EPS);
        }
        assert_eq!(double[3], 1.0);
    }

    #[test]
    fn saturated_head_on_lighting_clamps_to_one() {
        // Normal, light direction, and view direction all aligned: ambient
        // 0.1 + diffuse 1.0 + specular 1.0 per light, summed over two
        // lights, far exceeds 1 and must clamp per channel.
        let light = head_on_light([1.0, 1.0, 1.0]);
        let result = shade(&facing_surface(), &white_ambient(0.1), &[light, light]);
        assert_eq!(result, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn base_color_modulates_the_full_phong_sum() {
        // Ambient, diffuse, and specular are all scaled by the base color,
        // so a half-grey surface returns exactly half the white result
        // (clamp inactive at these levels).
        let light = head_on_light([0.2, 0.2, 0.2]);
        let ambient = white_ambient(0.1);

        let white = shade(&facing_surface(), &ambient, &[light]);
        let grey = Surface {
            base_color: [0.5, 0.5, 0.5],
            ..facing_surface()
        };
        let grey_result = shade(&grey, &ambient, &[light]);
        for channel in 0..3 {
            assert!((grey_result[channel] - 0.5 * white[channel]).abs() < EPS);
        }
    }

    #[test]
    fn light_behind_the_surface_leaves_only_ambient() {
        let (mut light, specular) = head_on_light([0.5, 0.5, 0.5]);
        light.position = [0.0, 0.0, -10.0];
        let ambient = white_ambient(0.1);
        let result = shade(&facing_surface(), &ambient, &[(light, specular)]);
        for channel in 0..3 {
            assert!((result[channel] - 0.1 * 0.5).abs() < EPS);
        }
    }

    #[test]
    fn ambient_color_scales_the_ambient_term_only() {
        let (mut light, specular) = head_on_light([0.5, 0.5, 0.5]);
        // Put the light behind so only ambient survives.
        light.position = [0.0, 0.0, -10.0];
        let tinted = Ambient {
            color: [1.0, 0.5, 0.0],
            strength: 0.2,
        };
        let result = shade(&facing_surface(), &tinted, &[(light, specular)]);
        assert!((result[0] - 0.2 * 1.0 * 0.5).abs() < EPS);
        assert!((result[1] - 0.2 * 0.5 * 0.5).abs() < EPS);
        assert!((result[2] - 0.0).abs() < EPS);
    }

    #[test]
    fn default_config_keeps_a_white_surface_in_range() {
        // A white, untextured face lit by both warm lights: the additive
        // sum overshoots and must come back clamped, never out of range.
        let config = LightingConfig::default();
        let specular = SpecularParams {
            intensity: 1.0,
            highlight_size: 25.0,
        };
        let surface = Surface {
            world_position: [0.0, 3.5, 0.0],
            normal: [0.0, 1.0, 0.0],
            view_position: [0.0, 20.0, 0.0],
            base_color: [1.0, 1.0, 1.0],
        };
        let result = shade(
            &surface,
            &config.ambient,
            &[
                (config.lights[0], specular),
                (config.lights[1], specular),
            ],
        );
        for channel in 0..3 {
            assert!((0.0..=1.0).contains(&result[channel]));
            // Both lights are above the surface, so the result clears the
            // ambient floor.
            assert!(result[channel] > config.ambient.strength);
        }
        assert_eq!(result[3], 1.0);
    }

    #[test]
    fn grazing_light_contributes_no_negative_terms() {
        let (mut light, specular) = head_on_light([0.5, 0.5, 0.5]);
        light.position = [10.0, 0.0, 0.0]; // perpendicular to the normal
        let result = shade(&facing_surface(), &white_ambient(0.0), &[(light, specular)]);
        for channel in 0..3 {
            assert!(result[channel].abs() < 1e-3);
        }
    }
}
