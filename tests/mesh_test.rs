use cgmath::Deg;
use hexagon_ngin::data_structures::mesh::{HEXAGON_FAN, Hexagon, Vertex, fan_indices};

#[test]
fn hexagon_fan_starts_at_centre_and_closes_on_first_rim_vertex() {
    assert_eq!(HEXAGON_FAN.len(), 8);
    assert_eq!(HEXAGON_FAN[0], Vertex::new(0.0, 0.0, 0.0));
    assert_eq!(HEXAGON_FAN[7], HEXAGON_FAN[1]);
    assert!(HEXAGON_FAN.iter().all(|v| v.position[2] == 0.0));
}

#[test]
fn hexagon_rim_is_counter_clockwise() {
    // Shoelace formula over the six rim vertices; positive area means CCW.
    let rim = &HEXAGON_FAN[1..7];
    let area: f32 = rim
        .iter()
        .zip(rim.iter().cycle().skip(1))
        .map(|(a, b)| a.position[0] * b.position[1] - b.position[0] * a.position[1])
        .sum::<f32>()
        / 2.0;
    assert!(area > 0.0, "rim winds clockwise, area {area}");
}

#[test]
fn fan_expands_to_one_triangle_per_rim_edge() {
    let indices = fan_indices(HEXAGON_FAN.len());
    assert_eq!(
        indices,
        vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 5, 0, 5, 6, 0, 6, 7]
    );
}

#[test]
fn fan_with_fewer_than_three_vertices_has_no_triangles() {
    assert!(fan_indices(0).is_empty());
    assert!(fan_indices(1).is_empty());
    assert!(fan_indices(2).is_empty());
    assert_eq!(fan_indices(3), vec![0, 1, 2]);
}

#[test]
fn default_hexagon_is_the_hand_placed_fan() {
    let hexagon = Hexagon::default();
    assert_eq!(hexagon.vertices, HEXAGON_FAN.to_vec());
    assert_eq!(hexagon.triangle_count(), 6);
    assert_eq!(hexagon.indices().len(), 18);
}

#[test]
fn hand_placed_hexagon_is_nearly_regular() {
    let regular = Hexagon::regular(0.7, Deg(52.0));
    assert_eq!(regular.vertices.len(), HEXAGON_FAN.len());
    for (expected, actual) in HEXAGON_FAN.iter().zip(&regular.vertices) {
        for axis in 0..3 {
            let diff = (expected.position[axis] - actual.position[axis]).abs();
            assert!(
                diff < 0.01,
                "{:?} differs from {:?} by {}",
                actual,
                expected,
                diff
            );
        }
    }
}

#[test]
fn regular_hexagon_rim_lies_on_the_radius() {
    let hexagon = Hexagon::regular(0.5, Deg(0.0));
    assert_eq!(hexagon.vertices[0], Vertex::new(0.0, 0.0, 0.0));
    assert_eq!(hexagon.vertices[7], hexagon.vertices[1]);
    for v in &hexagon.vertices[1..7] {
        let r = (v.position[0].powi(2) + v.position[1].powi(2)).sqrt();
        assert!((r - 0.5).abs() < 1e-5);
    }
    assert!((hexagon.vertices[1].position[0] - 0.5).abs() < 1e-6);
    assert!(hexagon.vertices[1].position[1].abs() < 1e-6);
}

#[test]
fn vertex_layout_is_a_single_vec3() {
    let layout = Vertex::desc();
    assert_eq!(layout.array_stride, 12);
    assert_eq!(layout.attributes.len(), 1);
    assert_eq!(layout.attributes[0].shader_location, 0);
    assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
}

#[test]
fn fans_past_the_u16_range_keep_every_triangle() {
    let indices = fan_indices(65536);
    assert_eq!(indices.len(), 65534 * 3);
    assert_eq!(indices[indices.len() - 3..], [0, 65534, 65535]);

    assert_eq!(fan_indices(65538).len(), 196608);

    let hexagon = Hexagon {
        vertices: vec![Vertex::new(0.0, 0.0, 0.0); 70_000],
    };
    assert_eq!(hexagon.indices().len(), hexagon.triangle_count() * 3);
}
