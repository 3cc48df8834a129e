/// Camera-facing quads: one indexed quad per active cell, expanded in view
/// space by `particle_size` and textured with the sprite.
pub const QUAD_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    camera_position: vec4<f32>,
    focus: vec4<f32>,
    // particle_size, point_scale, viewport width, viewport height
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var sprite_texture: texture_2d<f32>;
@group(1) @binding(1)
var sprite_sampler: sampler;

struct QuadInput {
    @location(0) corner: vec2<f32>,
    @location(1) texcoord: vec2<f32>,
    @location(2) center: vec3<f32>,
};

struct SpriteOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
};

@vertex
fn vs_quad(in: QuadInput) -> SpriteOutput {
    let view_center = uniforms.view * vec4<f32>(in.center, 1.0);
    let offset = vec4<f32>(in.corner * uniforms.params.x, 0.0, 0.0);

    var out: SpriteOutput;
    out.clip_position = uniforms.projection * (view_center + offset);
    out.texcoord = in.texcoord;
    return out;
}

@fragment
fn fs_sprite(in: SpriteOutput) -> @location(0) vec4<f32> {
    let color = textureSample(sprite_texture, sprite_sampler, in.texcoord);
    if (color.a < 0.01) {
        discard;
    }
    return color;
}
"#;

/// Point sprites: one instanced screen-aligned square per active cell,
/// `point_scale / clip.w` pixels across.
pub const POINT_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    camera_position: vec4<f32>,
    focus: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var sprite_texture: texture_2d<f32>;
@group(1) @binding(1)
var sprite_sampler: sampler;

struct PointInput {
    @location(0) corner: vec2<f32>,
    @location(2) center: vec3<f32>,
};

struct SpriteOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
};

@vertex
fn vs_point(in: PointInput) -> SpriteOutput {
    let clip = uniforms.projection * uniforms.view * vec4<f32>(in.center, 1.0);
    let size_px = uniforms.params.y / clip.w;
    let ndc_offset = in.corner * size_px / uniforms.params.zw;

    var out: SpriteOutput;
    out.clip_position = clip + vec4<f32>(ndc_offset * clip.w, 0.0, 0.0);
    out.texcoord = in.corner * 0.5 + vec2<f32>(0.5, 0.5);
    return out;
}

@fragment
fn fs_sprite(in: SpriteOutput) -> @location(0) vec4<f32> {
    let color = textureSample(sprite_texture, sprite_sampler, in.texcoord);
    if (color.a < 0.01) {
        discard;
    }
    return color;
}
"#;

/// Fullscreen triangle reading the field slice texel by texel.
pub const FIELD_SHADER: &str = r#"
@group(1) @binding(0)
var field_texture: texture_2d<f32>;

struct FieldOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) index: u32) -> FieldOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));

    var out: FieldOutput;
    out.clip_position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}

@fragment
fn fs_field(in: FieldOutput) -> @location(0) vec4<f32> {
    let dims = vec2<f32>(textureDimensions(field_texture));
    let texel = vec2<i32>(clamp(in.uv * dims, vec2<f32>(0.0, 0.0), dims - 1.0));
    let value = textureLoad(field_texture, texel, 0).r;
    let shade = clamp(value, 0.0, 1.0);
    return vec4<f32>(shade, shade, shade, 1.0);
}
"#;
