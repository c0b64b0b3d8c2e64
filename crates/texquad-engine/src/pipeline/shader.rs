//! Shader units and their compilation.
//!
//! Three named WGSL units make up the pipeline: vertex (`vs_main`), geometry
//! (`gs_main`) and pixel (`ps_main`). wgpu exposes no geometry stage, so the
//! geometry unit is compiled on its own and then linked into the vertex-stage
//! program; it runs with vertex-stage visibility and owns the per-frame
//! transform binding.
//!
//! Compilation parses and validates each program with naga before anything is
//! handed to the device, so failures surface as [`SetupError::ShaderCompile`]
//! naming the offending unit.

use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::SetupError;

use super::layout::{self, InputSlot};

/// Logical pipeline stage a unit belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Pixel,
}

impl ShaderStage {
    /// wgpu stage the unit executes in.
    pub fn visibility(self) -> wgpu::ShaderStages {
        match self {
            ShaderStage::Vertex | ShaderStage::Geometry => wgpu::ShaderStages::VERTEX,
            ShaderStage::Pixel => wgpu::ShaderStages::FRAGMENT,
        }
    }
}

/// A named shader source with a fixed entry point.
#[derive(Debug, Copy, Clone)]
pub struct ShaderUnit {
    pub name: &'static str,
    pub stage: ShaderStage,
    pub entry_point: &'static str,
    pub source: &'static str,
}

pub const VERTEX_UNIT: ShaderUnit = ShaderUnit {
    name: "vertex.wgsl",
    stage: ShaderStage::Vertex,
    entry_point: "vs_main",
    source: include_str!("shaders/vertex.wgsl"),
};

pub const GEOMETRY_UNIT: ShaderUnit = ShaderUnit {
    name: "geometry.wgsl",
    stage: ShaderStage::Geometry,
    entry_point: "gs_main",
    source: include_str!("shaders/geometry.wgsl"),
};

pub const PIXEL_UNIT: ShaderUnit = ShaderUnit {
    name: "fragment.wgsl",
    stage: ShaderStage::Pixel,
    entry_point: "ps_main",
    source: include_str!("shaders/fragment.wgsl"),
};

/// A parsed and validated program ready to become a `wgpu::ShaderModule`.
#[derive(Debug)]
pub struct CompiledProgram {
    pub unit: ShaderUnit,
    /// Full WGSL source, including linked units.
    pub source: String,
    pub module: naga::Module,
}

impl CompiledProgram {
    pub fn entry_point(&self) -> &'static str {
        self.unit.entry_point
    }

    /// Inputs declared by the vertex entry point, sorted by location.
    pub fn input_signature(&self) -> Result<Vec<InputSlot>, SetupError> {
        input_signature(self.unit, &self.module)
    }

    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.unit.name),
            source: wgpu::ShaderSource::Wgsl(self.source.as_str().into()),
        })
    }
}

/// The two programs the pipeline binds.
#[derive(Debug)]
pub struct ShaderPrograms {
    /// Vertex unit with the geometry unit linked in.
    pub vertex: CompiledProgram,
    pub pixel: CompiledProgram,
}

/// Compiles the three pipeline units and checks the vertex input signature
/// against the fixed layout.
pub fn compile_pipeline_programs() -> Result<ShaderPrograms, SetupError> {
    compile_programs(&VERTEX_UNIT, &GEOMETRY_UNIT, &PIXEL_UNIT)
}

pub(crate) fn compile_programs(
    vertex: &ShaderUnit,
    geometry: &ShaderUnit,
    pixel: &ShaderUnit,
) -> Result<ShaderPrograms, SetupError> {
    // Geometry first so its own errors are attributed to it, not to the
    // vertex program it is linked into.
    let geometry_program = compile_unit(geometry, &[])?;
    require_function(geometry, &geometry_program.module)?;

    let vertex_program = compile_unit(vertex, &[geometry])?;
    require_entry_point(vertex, &vertex_program.module, naga::ShaderStage::Vertex)?;
    layout::validate_signature(vertex.name, &vertex_program.input_signature()?)?;

    let pixel_program = compile_unit(pixel, &[])?;
    require_entry_point(pixel, &pixel_program.module, naga::ShaderStage::Fragment)?;

    log::debug!(
        "compiled shader units {}, {}, {}",
        vertex.name,
        geometry.name,
        pixel.name
    );

    Ok(ShaderPrograms {
        vertex: vertex_program,
        pixel: pixel_program,
    })
}

/// Parses and validates `unit` with `linked` units appended to its source.
pub fn compile_unit(unit: &ShaderUnit, linked: &[&ShaderUnit]) -> Result<CompiledProgram, SetupError> {
    let mut source = String::from(unit.source);
    for dep in linked {
        source.push('\n');
        source.push_str(dep.source);
    }

    let module = naga::front::wgsl::parse_str(&source).map_err(|e| SetupError::ShaderCompile {
        unit: unit.name,
        message: e.emit_to_string(&source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| SetupError::ShaderCompile {
            unit: unit.name,
            message: e.to_string(),
        })?;

    Ok(CompiledProgram {
        unit: *unit,
        source,
        module,
    })
}

fn require_entry_point(
    unit: &ShaderUnit,
    module: &naga::Module,
    stage: naga::ShaderStage,
) -> Result<(), SetupError> {
    let found = module
        .entry_points
        .iter()
        .any(|ep| ep.name == unit.entry_point && ep.stage == stage);

    if found {
        Ok(())
    } else {
        Err(SetupError::ShaderCompile {
            unit: unit.name,
            message: format!("missing {stage:?} entry point `{}`", unit.entry_point),
        })
    }
}

fn require_function(unit: &ShaderUnit, module: &naga::Module) -> Result<(), SetupError> {
    let found = module
        .functions
        .iter()
        .any(|(_, f)| f.name.as_deref() == Some(unit.entry_point));

    if found {
        Ok(())
    } else {
        Err(SetupError::ShaderCompile {
            unit: unit.name,
            message: format!("missing function `{}`", unit.entry_point),
        })
    }
}

/// Collects `@location` inputs of the unit's entry point, flattening struct
/// arguments.
fn input_signature(unit: ShaderUnit, module: &naga::Module) -> Result<Vec<InputSlot>, SetupError> {
    let entry = module
        .entry_points
        .iter()
        .find(|ep| ep.name == unit.entry_point)
        .ok_or_else(|| SetupError::ShaderCompile {
            unit: unit.name,
            message: format!("missing entry point `{}`", unit.entry_point),
        })?;

    let mut slots = Vec::new();
    for arg in &entry.function.arguments {
        match (&arg.binding, &module.types[arg.ty].inner) {
            (Some(binding), inner) => push_slot(unit, &mut slots, binding, inner)?,
            (None, naga::TypeInner::Struct { members, .. }) => {
                for member in members {
                    if let Some(binding) = &member.binding {
                        push_slot(unit, &mut slots, binding, &module.types[member.ty].inner)?;
                    }
                }
            }
            (None, _) => {}
        }
    }

    slots.sort_by_key(|s| s.location);
    Ok(slots)
}

fn push_slot(
    unit: ShaderUnit,
    slots: &mut Vec<InputSlot>,
    binding: &naga::Binding,
    inner: &naga::TypeInner,
) -> Result<(), SetupError> {
    // Builtins (vertex_index etc.) are not fed from the vertex buffer.
    let naga::Binding::Location { location, .. } = binding else {
        return Ok(());
    };

    let format = vertex_format(inner).ok_or_else(|| SetupError::ShaderCompile {
        unit: unit.name,
        message: format!("unsupported input type at @location({location})"),
    })?;

    slots.push(InputSlot {
        location: *location,
        format,
    });
    Ok(())
}

fn vertex_format(inner: &naga::TypeInner) -> Option<wgpu::VertexFormat> {
    use naga::{ScalarKind, TypeInner, VectorSize};

    match *inner {
        TypeInner::Scalar(s) if s.kind == ScalarKind::Float && s.width == 4 => {
            Some(wgpu::VertexFormat::Float32)
        }
        TypeInner::Vector { size, scalar } if scalar.kind == ScalarKind::Float && scalar.width == 4 => {
            Some(match size {
                VectorSize::Bi => wgpu::VertexFormat::Float32x2,
                VectorSize::Tri => wgpu::VertexFormat::Float32x3,
                VectorSize::Quad => wgpu::VertexFormat::Float32x4,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROKEN_GEOMETRY: ShaderUnit = ShaderUnit {
        source: "fn gs_main( -> GeometryOutput {",
        ..GEOMETRY_UNIT
    };

    const RENAMED_PIXEL: ShaderUnit = ShaderUnit {
        source: "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
        ..PIXEL_UNIT
    };

    const NARROW_VERTEX: ShaderUnit = ShaderUnit {
        source: "
            struct VertexInput {
                @location(0) position: vec2<f32>,
                @location(1) color: vec3<f32>,
                @location(2) texcoord: vec2<f32>,
            }

            @vertex
            fn vs_main(input: VertexInput) -> GeometryOutput {
                return gs_main(vec3<f32>(input.position, 0.0), input.color, input.texcoord);
            }
        ",
        ..VERTEX_UNIT
    };

    // ── pipeline units ────────────────────────────────────────────────────

    #[test]
    fn pipeline_units_compile() {
        let programs = compile_pipeline_programs().unwrap();
        assert_eq!(programs.vertex.entry_point(), "vs_main");
        assert_eq!(programs.pixel.entry_point(), "ps_main");
    }

    #[test]
    fn vertex_program_links_geometry_unit() {
        let programs = compile_pipeline_programs().unwrap();
        assert!(programs.vertex.source.contains("fn gs_main"));
        assert!(!programs.pixel.source.contains("fn gs_main"));
    }

    #[test]
    fn vertex_signature_matches_layout() {
        let programs = compile_pipeline_programs().unwrap();
        let sig = programs.vertex.input_signature().unwrap();
        let expected: Vec<InputSlot> = layout::Vertex::ATTRIBUTES
            .iter()
            .map(|a| InputSlot { location: a.shader_location, format: a.format })
            .collect();
        assert_eq!(sig, expected);
    }

    #[test]
    fn transform_is_consumed_by_geometry_stage() {
        assert_eq!(GEOMETRY_UNIT.stage, ShaderStage::Geometry);
        assert!(GEOMETRY_UNIT.source.contains("var<uniform> transform"));
        assert!(!VERTEX_UNIT.source.contains("var<uniform>"));
        assert_eq!(ShaderStage::Geometry.visibility(), wgpu::ShaderStages::VERTEX);
        assert_eq!(ShaderStage::Pixel.visibility(), wgpu::ShaderStages::FRAGMENT);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn syntax_error_names_the_unit() {
        let err = compile_programs(&VERTEX_UNIT, &BROKEN_GEOMETRY, &PIXEL_UNIT).unwrap_err();
        match err {
            SetupError::ShaderCompile { unit, message } => {
                assert_eq!(unit, "geometry.wgsl");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_entry_point_is_rejected() {
        let err = compile_programs(&VERTEX_UNIT, &GEOMETRY_UNIT, &RENAMED_PIXEL).unwrap_err();
        match err {
            SetupError::ShaderCompile { unit, message } => {
                assert_eq!(unit, "fragment.wgsl");
                assert!(message.contains("ps_main"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mismatched_signature_is_rejected() {
        let err = compile_programs(&NARROW_VERTEX, &GEOMETRY_UNIT, &PIXEL_UNIT).unwrap_err();
        assert!(matches!(err, SetupError::ShaderCompile { unit: "vertex.wgsl", .. }));
    }
}
