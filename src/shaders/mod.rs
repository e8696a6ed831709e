//! Shader pairs, their uniform schemas and validated materials.
//!
//! A [`ShaderMaterial`] is an instance of a [`ShaderPair`] with every uniform
//! set. It can only be built from a complete, correctly typed value set, so
//! a material that exists is always uploadable.
//!
//! ```ignore
//! use folio_fx::shaders::{ShaderMaterial, HOLOGRAPHIC};
//!
//! let mut material = ShaderMaterial::new(&HOLOGRAPHIC, &[("time", 0.0f32.into())])?;
//! material.set_time(1.5);
//! queue.write_buffer(&buffer, 0, &material.to_bytes());
//! ```

mod library;
mod uniforms;

pub use library::{
    GlowWireframeUniforms, HolographicUniforms, MatrixRainUniforms, MorphFresnelUniforms,
    NeuralNodeUniforms, PairTarget, ParticleSpriteUniforms, ShaderPair, GLOW_WIREFRAME,
    HOLOGRAPHIC, MATRIX_RAIN, MORPH_FRESNEL, NEURAL_NODE, PAIRS, PARTICLE_SPRITE,
};
pub use uniforms::{buffer_size, offsets, UniformKind, UniformSlot, UniformValue};

use crate::error::MaterialError;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A shader pair with a complete uniform set.
#[derive(Debug, Clone)]
pub struct ShaderMaterial {
    pair: &'static ShaderPair,
    /// One value per schema slot, in schema order.
    values: Vec<UniformValue>,
}

impl ShaderMaterial {
    /// Build a material, checking `values` against the pair's schema.
    ///
    /// Fails on a name the pair does not declare, on a value of the wrong
    /// kind, or when any declared uniform is left without a value.
    pub fn new(
        pair: &'static ShaderPair,
        values: &[(&str, UniformValue)],
    ) -> Result<Self, MaterialError> {
        let mut slots: Vec<Option<UniformValue>> = vec![None; pair.uniforms.len()];

        for (name, value) in values {
            let index = check_slot(pair, name, value)?;
            slots[index] = Some(*value);
        }

        let values = slots
            .into_iter()
            .zip(pair.uniforms)
            .map(|(value, slot)| {
                value.ok_or(MaterialError::MissingUniform {
                    pair: pair.name,
                    name: slot.name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { pair, values })
    }

    /// Values already in schema order and of the declared kinds.
    pub(crate) fn from_ordered(pair: &'static ShaderPair, values: Vec<UniformValue>) -> Self {
        debug_assert_eq!(values.len(), pair.uniforms.len());
        debug_assert!(values
            .iter()
            .zip(pair.uniforms)
            .all(|(v, s)| v.kind() == s.kind));
        Self { pair, values }
    }

    pub fn pair(&self) -> &'static ShaderPair {
        self.pair
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.pair.slot(name).map(|(index, _)| self.values[index])
    }

    /// Update one uniform. The schema still applies.
    pub fn set<V: Into<UniformValue>>(&mut self, name: &str, value: V) -> Result<(), MaterialError> {
        let value = value.into();
        let index = check_slot(self.pair, name, &value)?;
        self.values[index] = value;
        Ok(())
    }

    /// Write the `time` uniform. No-op for pairs without one.
    pub fn set_time(&mut self, elapsed: f64) {
        if let Some((index, _)) = self.pair.slot("time") {
            self.values[index] = UniformValue::F32(elapsed as f32);
        }
    }

    /// Uniform bytes laid out to match the generated `Material` struct.
    pub fn to_bytes(&self) -> Vec<u8> {
        uniforms::pack(self.pair.uniforms, &self.values)
    }

    pub fn byte_size(&self) -> usize {
        buffer_size(self.pair.uniforms)
    }
}

impl PartialEq for ShaderMaterial {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.pair, other.pair) && self.values == other.values
    }
}

fn check_slot(
    pair: &'static ShaderPair,
    name: &str,
    value: &UniformValue,
) -> Result<usize, MaterialError> {
    let (index, slot) = pair
        .slot(name)
        .ok_or_else(|| MaterialError::UnknownUniform {
            pair: pair.name,
            name: name.to_string(),
        })?;

    if slot.kind != value.kind() {
        return Err(MaterialError::KindMismatch {
            pair: pair.name,
            name: name.to_string(),
            expected: slot.kind.wgsl_type(),
            found: value.kind().wgsl_type(),
        });
    }
    Ok(index)
}

/// Registry of every built-in pair with its assembled WGSL module.
#[derive(Debug)]
pub struct ShaderLibrary {
    modules: HashMap<&'static str, (&'static ShaderPair, String)>,
}

static LIBRARY: OnceLock<ShaderLibrary> = OnceLock::new();

impl ShaderLibrary {
    fn build() -> Self {
        let modules = PAIRS
            .iter()
            .map(|pair| (pair.name, (*pair, pair.module_source())))
            .collect();
        Self { modules }
    }

    /// Build the process-wide library. Returns true if this call built it.
    pub(crate) fn install() -> bool {
        let mut built = false;
        LIBRARY.get_or_init(|| {
            built = true;
            let library = Self::build();
            log::debug!("Shader library ready with {} pairs", library.len());
            library
        });
        built
    }

    /// The process-wide library, once [`init`](crate::init) has run.
    pub fn global() -> Option<&'static ShaderLibrary> {
        LIBRARY.get()
    }

    pub fn pair(&self, name: &str) -> Option<&'static ShaderPair> {
        self.modules.get(name).map(|(pair, _)| *pair)
    }

    /// Full WGSL module source for a pair.
    pub fn source(&self, name: &str) -> Option<&str> {
        self.modules.get(name).map(|(_, source)| source.as_str())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_new_accepts_complete_set() {
        let material = ShaderMaterial::new(
            &MORPH_FRESNEL,
            &[
                ("color2", Vec3::Z.into()),
                ("time", 0.0f32.into()),
                ("color1", Vec3::X.into()),
            ],
        )
        .unwrap();
        assert_eq!(material.get("color1"), Some(UniformValue::Vec3(Vec3::X)));
        assert_eq!(material.to_bytes().len(), 48);
    }

    #[test]
    fn test_new_rejects_missing_uniform() {
        let err = ShaderMaterial::new(&MORPH_FRESNEL, &[("time", 0.0f32.into())]).unwrap_err();
        assert_eq!(
            err,
            MaterialError::MissingUniform {
                pair: "morph_fresnel",
                name: "color1"
            }
        );
    }

    #[test]
    fn test_new_rejects_unknown_and_mismatched() {
        let unknown = ShaderMaterial::new(&HOLOGRAPHIC, &[("time", 0.0f32.into()), ("speed", 1.0f32.into())]);
        assert!(matches!(unknown, Err(MaterialError::UnknownUniform { .. })));

        let mismatched = ShaderMaterial::new(&HOLOGRAPHIC, &[("time", Vec3::ONE.into())]);
        assert!(matches!(
            mismatched,
            Err(MaterialError::KindMismatch {
                expected: "f32",
                found: "vec3<f32>",
                ..
            })
        ));
    }

    #[test]
    fn test_set_keeps_schema() {
        let mut material: ShaderMaterial = HolographicUniforms { time: 0.0 }.into();
        material.set_time(2.5);
        assert_eq!(material.get("time"), Some(UniformValue::F32(2.5)));
        assert!(material.set("time", Vec3::ONE).is_err());
        assert!(material.set("nope", 1.0f32).is_err());
    }

    #[test]
    fn test_typed_uniforms_match_checked_construction() {
        let typed: ShaderMaterial = GlowWireframeUniforms {
            time: 1.0,
            amplitude: 0.2,
            color: Vec3::new(0.3, 0.7, 0.6),
            opacity: 0.8,
        }
        .into();
        let checked = ShaderMaterial::new(
            &GLOW_WIREFRAME,
            &[
                ("time", 1.0f32.into()),
                ("amplitude", 0.2f32.into()),
                ("color", Vec3::new(0.3, 0.7, 0.6).into()),
                ("opacity", 0.8f32.into()),
            ],
        )
        .unwrap();
        assert_eq!(typed, checked);
        assert_eq!(typed.to_bytes(), checked.to_bytes());
    }

    #[test]
    fn test_library_install_is_idempotent() {
        ShaderLibrary::install();
        assert!(!ShaderLibrary::install());
        let library = ShaderLibrary::global().unwrap();
        assert_eq!(library.len(), PAIRS.len());
        assert!(library.source("particle_sprite").unwrap().contains("fn vs_main"));
        assert!(library.pair("missing").is_none());
    }
}
