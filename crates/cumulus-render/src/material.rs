//! Ray-marched cloud material.
//!
//! [`CloudMaterial`] holds every parameter the volume shader reads. Setters
//! only record a change when the value actually differs, so a renderer can
//! call [`CloudMaterial::apply_changes`] once per frame and upload just what
//! moved. Three parameters are compile-time switches in the shader (gradient
//! map presence, step count, inversion); changing any of them is reported as
//! [`MaterialChanges::needs_recompile`].

use std::collections::BTreeSet;
use std::sync::Arc;

use cumulus_core::color::linear_from_srgb_hex;
use cumulus_volume::{DensityVolume, GradientField};
use glam::{Mat4, Vec3};

/// Default base color before a preset is applied.
pub const DEFAULT_BASE_HEX: u32 = 0xee_ee_ee;

/// A material parameter that can be marked as changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaterialParam {
    BaseColor,
    Absorption,
    Decay,
    WindowMin,
    WindowMax,
    Inverse,
    Steps,
    Volume,
    UseGradientMap,
    InverseModelView,
    InverseVoxelSize,
    AlphaTest,
}

impl MaterialParam {
    /// Whether changing this parameter requires rebuilding the shader.
    #[must_use]
    pub fn requires_recompile(self) -> bool {
        matches!(self, Self::UseGradientMap | Self::Steps | Self::Inverse)
    }
}

/// Parameters drained by [`CloudMaterial::apply_changes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialChanges {
    /// Every parameter that changed since the last drain, in a stable order.
    pub params: Vec<MaterialParam>,
    /// True when a compile-time switch is among `params`.
    pub needs_recompile: bool,
}

impl MaterialChanges {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Whether `param` is part of this change set.
    #[must_use]
    pub fn contains(&self, param: MaterialParam) -> bool {
        self.params.contains(&param)
    }
}

/// Shading parameters of the cloud volume.
#[derive(Debug, Clone)]
pub struct CloudMaterial {
    base_color: Vec3,
    absorption: f32,
    decay: f32,
    window_min: f32,
    window_max: f32,
    inverse: bool,
    steps: u32,
    volume: Option<Arc<DensityVolume>>,
    gradient_map: Option<Arc<GradientField>>,
    inverse_model_view: Mat4,
    inverse_voxel_size: Vec3,
    alpha_test: f32,
    dirty: BTreeSet<MaterialParam>,
}

impl Default for CloudMaterial {
    fn default() -> Self {
        Self {
            base_color: linear_from_srgb_hex(DEFAULT_BASE_HEX),
            absorption: 0.15,
            decay: 1.0,
            window_min: 0.15,
            window_max: 0.35,
            inverse: false,
            steps: 100,
            volume: None,
            gradient_map: None,
            inverse_model_view: Mat4::IDENTITY,
            inverse_voxel_size: Vec3::ONE,
            alpha_test: 0.9,
            dirty: BTreeSet::new(),
        }
    }
}

macro_rules! setter {
    ($(#[$doc:meta])* $name:ident, $field:ident, $ty:ty, $param:expr) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: $ty) {
            if self.$field != value {
                self.$field = value;
                self.dirty.insert($param);
            }
        }
    };
}

impl CloudMaterial {
    /// Material with shader defaults and no volume bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setter!(
        /// Sets the linear-space base color.
        set_base_color, base_color, Vec3, MaterialParam::BaseColor
    );
    setter!(
        /// Sets the absorption coefficient.
        set_absorption, absorption, f32, MaterialParam::Absorption
    );
    setter!(
        /// Sets the density decay exponent.
        set_decay, decay, f32, MaterialParam::Decay
    );
    setter!(
        /// Sets the lower bound of the density window.
        set_window_min, window_min, f32, MaterialParam::WindowMin
    );
    setter!(
        /// Sets the upper bound of the density window.
        set_window_max, window_max, f32, MaterialParam::WindowMax
    );
    setter!(
        /// Toggles density inversion.
        set_inverse, inverse, bool, MaterialParam::Inverse
    );
    setter!(
        /// Sets the ray-marching step count.
        set_steps, steps, u32, MaterialParam::Steps
    );
    setter!(
        /// Sets the inverse model-view transform used to bring rays into
        /// volume space.
        set_inverse_model_view, inverse_model_view, Mat4, MaterialParam::InverseModelView
    );
    setter!(
        /// Sets the alpha cutoff.
        set_alpha_test, alpha_test, f32, MaterialParam::AlphaTest
    );

    /// Binds the density volume and derives the voxel size from it.
    pub fn set_volume(&mut self, volume: Arc<DensityVolume>) {
        let voxel_size = volume.inverse_voxel_size();
        if voxel_size != self.inverse_voxel_size {
            self.inverse_voxel_size = voxel_size;
            self.dirty.insert(MaterialParam::InverseVoxelSize);
        }
        self.volume = Some(volume);
        self.dirty.insert(MaterialParam::Volume);
    }

    /// Binds or clears the gradient map.
    ///
    /// Only a change of presence flips the gradient-map switch.
    pub fn set_gradient_map(&mut self, gradient_map: Option<Arc<GradientField>>) {
        if gradient_map.is_some() != self.gradient_map.is_some() {
            self.dirty.insert(MaterialParam::UseGradientMap);
        }
        self.gradient_map = gradient_map;
    }

    /// Writes the inverse of `view * model`.
    pub fn update_inverse_model_view(&mut self, view: Mat4, model: Mat4) {
        self.set_inverse_model_view((view * model).inverse());
    }

    /// Drains the change set.
    pub fn apply_changes(&mut self) -> MaterialChanges {
        let params: Vec<MaterialParam> = std::mem::take(&mut self.dirty).into_iter().collect();
        let needs_recompile = params.iter().any(|p| p.requires_recompile());
        if needs_recompile {
            log::debug!("cloud material needs recompilation: {params:?}");
        }
        MaterialChanges {
            params,
            needs_recompile,
        }
    }

    /// Whether there are undrained changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[must_use]
    pub fn base_color(&self) -> Vec3 {
        self.base_color
    }

    #[must_use]
    pub fn absorption(&self) -> f32 {
        self.absorption
    }

    #[must_use]
    pub fn decay(&self) -> f32 {
        self.decay
    }

    #[must_use]
    pub fn window_min(&self) -> f32 {
        self.window_min
    }

    #[must_use]
    pub fn window_max(&self) -> f32 {
        self.window_max
    }

    #[must_use]
    pub fn inverse(&self) -> bool {
        self.inverse
    }

    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn volume(&self) -> Option<&Arc<DensityVolume>> {
        self.volume.as_ref()
    }

    #[must_use]
    pub fn gradient_map(&self) -> Option<&Arc<GradientField>> {
        self.gradient_map.as_ref()
    }

    /// Whether the shader should sample the gradient map.
    #[must_use]
    pub fn use_gradient_map(&self) -> bool {
        self.gradient_map.is_some()
    }

    #[must_use]
    pub fn inverse_model_view(&self) -> Mat4 {
        self.inverse_model_view
    }

    #[must_use]
    pub fn inverse_voxel_size(&self) -> Vec3 {
        self.inverse_voxel_size
    }

    #[must_use]
    pub fn alpha_test(&self) -> f32 {
        self.alpha_test
    }
}

/// GPU layout of the cloud material uniforms.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CloudUniforms {
    pub inverse_model_view: [[f32; 4]; 4],
    pub base_color: [f32; 3],
    pub absorption: f32,
    pub inverse_voxel_size: [f32; 3],
    pub decay: f32,
    pub window_min: f32,
    pub window_max: f32,
    pub alpha_test: f32,
    pub steps: u32,
    pub inverse: u32,
    pub use_gradient_map: u32,
    pub _padding: [u32; 2],
}

impl From<&CloudMaterial> for CloudUniforms {
    fn from(mat: &CloudMaterial) -> Self {
        Self {
            inverse_model_view: mat.inverse_model_view.to_cols_array_2d(),
            base_color: mat.base_color.to_array(),
            absorption: mat.absorption,
            inverse_voxel_size: mat.inverse_voxel_size.to_array(),
            decay: mat.decay,
            window_min: mat.window_min,
            window_max: mat.window_max,
            alpha_test: mat.alpha_test,
            steps: mat.steps,
            inverse: u32::from(mat.inverse),
            use_gradient_map: u32::from(mat.use_gradient_map()),
            _padding: [0; 2],
        }
    }
}

impl Default for CloudUniforms {
    fn default() -> Self {
        Self::from(&CloudMaterial::default())
    }
}
