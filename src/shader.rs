//! Shader compilation and linking checks.
//!
//! WGSL sources are parsed and validated with naga before they are handed to
//! wgpu. An invalid module would otherwise surface as an uncaptured device
//! error, which wgpu turns into a panic. Linking checks that the vertex stage
//! produces every location the fragment stage reads.
//!
//! Failures are reported as [`ShaderError`] and logged by [`report`]; they are
//! never fatal. Without a linked program the renderer only clears the frame.

use std::collections::HashMap;

use naga::{Binding, Module, ShaderStage, TypeInner};

pub const VERTEX_SHADER: &str = include_str!("shaders/hexagon_vertex.wgsl");
pub const FRAGMENT_SHADER: &str = include_str!("shaders/hexagon_fragment.wgsl");

/// The WGSL sources a program is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            vertex: VERTEX_SHADER,
            fragment: FRAGMENT_SHADER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn entry_point(self) -> &'static str {
        match self {
            Stage::Vertex => "vs_main",
            Stage::Fragment => "fs_main",
        }
    }

    fn naga(self) -> ShaderStage {
        match self {
            Stage::Vertex => ShaderStage::Vertex,
            Stage::Fragment => ShaderStage::Fragment,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Vertex => f.write_str("VERTEX"),
            Stage::Fragment => f.write_str("FRAGMENT"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("ERROR::SHADER::{stage}::COMPILATION_FAILED\n{log}")]
    Compilation { stage: Stage, log: String },
    #[error("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{log}")]
    Linking { log: String },
}

/// A shader stage that passed validation, ready to become a wgpu module.
#[derive(Debug)]
pub struct CompiledShader {
    pub stage: Stage,
    pub label: &'static str,
    pub source: &'static str,
    module: Module,
}

impl CompiledShader {
    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(self.source.into()),
        })
    }
}

/// Parses and validates `source` and checks it has the entry point `stage` expects.
pub fn compile(
    stage: Stage,
    label: &'static str,
    source: &'static str,
) -> Result<CompiledShader, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compilation {
        stage,
        log: e.emit_to_string(source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::Compilation {
            stage,
            log: e.emit_to_string(source),
        })?;

    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage.naga() && ep.name == stage.entry_point());
    if !has_entry {
        return Err(ShaderError::Compilation {
            stage,
            log: format!(
                "{label}: missing {} entry point `{}`",
                stage.to_string().to_lowercase(),
                stage.entry_point()
            ),
        });
    }

    Ok(CompiledShader {
        stage,
        label,
        source,
        module,
    })
}

/// Checks the vertex outputs cover the fragment inputs, location by location.
pub fn link(vertex: &CompiledShader, fragment: &CompiledShader) -> Result<(), ShaderError> {
    if vertex.stage != Stage::Vertex || fragment.stage != Stage::Fragment {
        return Err(ShaderError::Linking {
            log: format!(
                "expected a vertex and a fragment shader, got {} and {}",
                vertex.stage, fragment.stage
            ),
        });
    }

    let outputs = stage_outputs(&vertex.module);
    let inputs = stage_inputs(&fragment.module);

    let mut problems = Vec::new();
    let mut locations: Vec<_> = inputs.keys().copied().collect();
    locations.sort_unstable();
    for location in locations {
        match outputs.get(&location) {
            None => problems.push(format!(
                "fragment input at location {location} is not written by the vertex shader"
            )),
            Some(out) if *out != inputs[&location] => problems.push(format!(
                "location {location} has type {:?} in the vertex shader but {:?} in the fragment shader",
                out, inputs[&location]
            )),
            Some(_) => (),
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ShaderError::Linking {
            log: problems.join("\n"),
        })
    }
}

/// Logs a shader failure the same way for every stage.
pub fn report(err: &ShaderError) {
    log::error!("{}", err);
}

/// Compiles both stages of `sources` and links them.
///
/// Every failure is logged. `None` means there is no usable program.
pub fn build_program(sources: &ShaderSources) -> Option<(CompiledShader, CompiledShader)> {
    let vertex = compile(Stage::Vertex, "Hexagon Vertex Shader", sources.vertex).inspect_err(report);
    let fragment =
        compile(Stage::Fragment, "Hexagon Fragment Shader", sources.fragment).inspect_err(report);

    let (vertex, fragment) = match (vertex, fragment) {
        (Ok(vertex), Ok(fragment)) => (vertex, fragment),
        _ => {
            report(&ShaderError::Linking {
                log: "a shader stage failed to compile".to_string(),
            });
            return None;
        }
    };
    if let Err(e) = link(&vertex, &fragment) {
        report(&e);
        return None;
    }
    Some((vertex, fragment))
}

fn entry<'m>(module: &'m Module, stage: Stage) -> Option<&'m naga::EntryPoint> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga() && ep.name == stage.entry_point())
}

fn stage_outputs(module: &Module) -> HashMap<u32, TypeInner> {
    let mut locations = HashMap::new();
    if let Some(result) = entry(module, Stage::Vertex).and_then(|ep| ep.function.result.as_ref()) {
        collect_locations(module, result.ty, result.binding.as_ref(), &mut locations);
    }
    locations
}

fn stage_inputs(module: &Module) -> HashMap<u32, TypeInner> {
    let mut locations = HashMap::new();
    if let Some(ep) = entry(module, Stage::Fragment) {
        for arg in &ep.function.arguments {
            collect_locations(module, arg.ty, arg.binding.as_ref(), &mut locations);
        }
    }
    locations
}

fn collect_locations(
    module: &Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&Binding>,
    out: &mut HashMap<u32, TypeInner>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            out.insert(*location, module.types[ty].inner.clone());
        }
        Some(Binding::BuiltIn(_)) => (),
        // Unbound values are IO structs; their members carry the bindings.
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}
