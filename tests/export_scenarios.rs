use std::fs;
use std::io::Cursor;

use cgmath::{Deg, Euler, InnerSpace, Matrix4, Vector3};
use scmodel::error::MeshError;
use scmodel::prelude::*;
use scmodel::scene::object::compose_trs;

fn quad_mesh(smooth: bool) -> MeshData {
    MeshData::new(
        vec![
            MeshVertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            MeshVertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            MeshVertex::new([1.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            MeshVertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ],
        vec![Polygon::new(vec![0, 1, 2, 3], [0.0, 0.0, 1.0], smooth)],
    )
}

fn triangle_mesh() -> MeshData {
    MeshData::new(
        vec![
            MeshVertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            MeshVertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            MeshVertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ],
        vec![Polygon::new(vec![0, 1, 2], [0.0, 0.0, 1.0], false)],
    )
}

fn export_bytes(scene: &Scene) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    Exporter::default()
        .export_to_writer(scene, &mut cursor)
        .unwrap();
    cursor.into_inner()
}

fn read_back(scene: &Scene) -> ModelData {
    ModelData::from_reader(Cursor::new(export_bytes(scene))).unwrap()
}

#[test]
fn test_single_marker_file() {
    let mut scene = Scene::new();
    scene.add(
        SceneObject::new("@Spawn")
            .with_transform(Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))),
    );

    let bytes = export_bytes(&scene);

    let mut expected = Vec::new();
    expected.extend_from_slice(&1u32.to_le_bytes());
    expected.push(5);
    expected.extend_from_slice(b"Spawn");
    for f in [1.0f32, 2.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0] {
        expected.extend_from_slice(&f.to_le_bytes());
    }
    expected.extend_from_slice(&0u32.to_le_bytes());
    expected.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn test_rotated_scaled_marker_axes() {
    let rotation = Euler::new(Deg(0.0), Deg(0.0), Deg(90.0));
    let mut scene = Scene::new();
    scene.add(SceneObject::new("@Turn").with_transform(compose_trs(
        Vector3::new(0.0, 0.0, 0.0),
        rotation,
        Vector3::new(3.0, 3.0, 3.0),
    )));

    let model = read_back(&scene);
    let marker = model.find_marker("Turn").unwrap();
    assert!((marker.x_axis - Vector3::new(0.0, 1.0, 0.0)).magnitude() < 1e-5);
    assert!((marker.z_axis - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-5);
    assert!((marker.y_axis() - Vector3::new(-1.0, 0.0, 0.0)).magnitude() < 1e-5);
}

#[test]
fn test_flat_quad_without_uvs() {
    let mut scene = Scene::new();
    scene.add(SceneObject::new("^Box").with_mesh(quad_mesh(false)));

    let model = read_back(&scene);
    let geometry = model.find_geometry("Box").unwrap();
    assert_eq!(geometry.vertices.len(), 6);
    assert_eq!(geometry.triangle_count(), 2);
    for vertex in &geometry.vertices {
        assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertex.uv, [0.0, 0.0]);
    }
    let positions: Vec<[f32; 3]> = geometry.vertices.iter().map(|v| v.position).collect();
    assert_eq!(
        positions,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ]
    );
}

#[test]
fn test_active_uv_layer_is_written() {
    let uvs = vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]];
    let mesh = quad_mesh(true).with_uv_layer(UvLayer::new("UVMap", uvs));
    let mut scene = Scene::new();
    scene.add(SceneObject::new("^Tile").with_mesh(mesh));

    let model = read_back(&scene);
    let uvs: Vec<[f32; 2]> = model
        .find_geometry("Tile")
        .unwrap()
        .vertices
        .iter()
        .map(|v| v.uv)
        .collect();
    assert_eq!(
        uvs,
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]
    );
}

#[test]
fn test_failed_evaluation_keeps_record() {
    struct Failing;
    impl MeshEvaluator for Failing {
        fn evaluate(&self, object: &SceneObject) -> Result<Mesh, MeshError> {
            if object.name == "^Broken" {
                return Err(MeshError::Evaluation("modifier stack failed".into()));
            }
            DataMeshEvaluator.evaluate(object)
        }
    }

    let mut scene = Scene::new();
    scene.add(SceneObject::new("^Broken").with_mesh(quad_mesh(false)));
    scene.add(SceneObject::new("^Fine").with_mesh(quad_mesh(false)));

    let mut cursor = Cursor::new(Vec::new());
    let summary = Exporter::new(Failing)
        .export_to_writer(&scene, &mut cursor)
        .unwrap();
    assert_eq!(summary.skipped, vec!["^Broken".to_string()]);
    assert_eq!(summary.geometries, 2);

    let model = ModelData::from_reader(Cursor::new(cursor.into_inner())).unwrap();
    assert!(model.find_geometry("Broken").unwrap().vertices.is_empty());
    assert_eq!(model.find_geometry("Fine").unwrap().vertices.len(), 6);
}

#[test]
fn test_records_are_written_in_name_order() {
    let mut scene = Scene::new();
    scene.add(SceneObject::new("^b").with_mesh(triangle_mesh()));
    scene.add(SceneObject::new("^a").with_mesh(quad_mesh(false)));

    let bytes = export_bytes(&scene);
    assert_eq!(&bytes[4..8], &2u32.to_le_bytes());

    // "a" comes first even though it was added last
    assert_eq!(&bytes[8..10], &[1, b'a']);
    assert_eq!(&bytes[10..14], &6u32.to_le_bytes());
    let second = 14 + 6 * 32;
    assert_eq!(&bytes[second..second + 2], &[1, b'b']);
    assert_eq!(&bytes[second + 2..second + 6], &3u32.to_le_bytes());
    assert_eq!(bytes.len(), second + 6 + 3 * 32 + 4);
}

#[test]
fn test_collision_triangles_are_merged() {
    let mut scene = Scene::new();
    scene.add(SceneObject::new("%A").with_mesh(triangle_mesh()));
    scene.add(
        SceneObject::new("%B")
            .with_mesh(triangle_mesh())
            .with_transform(Matrix4::from_translation(Vector3::new(0.0, 0.0, 2.0))),
    );

    let bytes = export_bytes(&scene);
    // empty marker and geometry sections, then the collision count
    assert_eq!(&bytes[8..12], &2u32.to_le_bytes());
    assert_eq!(bytes.len(), 12 + 18 * 4);

    let model = ModelData::from_reader(Cursor::new(bytes)).unwrap();
    let triangles = &model.collision().triangles;
    assert_eq!(triangles.len(), 2);
    assert_eq!(triangles[1].points[0], Vector3::new(0.0, 0.0, 2.0));
}

#[test]
fn test_unclassified_objects_are_left_out() {
    let mut scene = Scene::new();
    scene.add(SceneObject::new("Camera"));
    scene.add(SceneObject::new("Cube").with_mesh(quad_mesh(false)));

    let mut cursor = Cursor::new(Vec::new());
    let summary = Exporter::default()
        .export_to_writer(&scene, &mut cursor)
        .unwrap();
    assert_eq!(summary.unclassified, 2);
    assert_eq!(cursor.into_inner(), vec![0u8; 12]);
}

#[test]
fn test_reexport_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = Scene::new();
    scene.add(SceneObject::new("^Board").with_mesh(quad_mesh(true)));
    scene.add(SceneObject::new("@Spawn"));
    scene.add(SceneObject::new("%Floor").with_mesh(triangle_mesh()));

    let first = dir.path().join("first.scmodel");
    let second = dir.path().join("second.scmodel");
    export(&scene, &first).unwrap();
    export(&scene, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_manifest_to_model_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("board.obj"),
        "o Board\nv 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\nvt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nf 1/1 2/2 3/3 4/4\n",
    )
    .unwrap();
    let manifest = dir.path().join("level.ron");
    fs::write(
        &manifest,
        r#"(
            objects: [
                (name: "@Spawn", translation: (0.0, 0.0, 1.0)),
                (name: "^Board", mesh: Some("board.obj"), translation: (5.0, 0.0, 0.0)),
                (name: "%Board", mesh: Some("board.obj")),
                (name: "Lamp"),
            ],
        )"#,
    )
    .unwrap();

    let scene = load_scene(&manifest).unwrap();
    let output = dir.path().join("level.scmodel");
    let summary = export(&scene, &output).unwrap();
    assert_eq!(summary.markers, 1);
    assert_eq!(summary.geometries, 1);
    assert_eq!(summary.collision_triangles, 2);
    assert_eq!(summary.unclassified, 1);

    let model = ModelData::load(&output).unwrap();
    let board = model.find_geometry("Board").unwrap();
    assert_eq!(board.vertices.len(), 6);
    assert_eq!(board.vertices[1].position, [7.0, 0.0, 0.0]);
    assert_eq!(board.vertices[2].uv, [1.0, 1.0]);
    assert_eq!(
        model.find_marker("Spawn").unwrap().position,
        Vector3::new(0.0, 0.0, 1.0)
    );
}
