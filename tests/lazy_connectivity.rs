use mesh_entities::prelude::*;

#[test]
fn tables_are_computed_once() -> Result<(), Box<dyn std::error::Error>> {
    let mesh = unit_square(2, 2, CellType::Triangle)?;
    let topology = mesh.topology();
    assert!(!topology.is_computed(1, 2));
    assert_eq!(topology.num_computations(), 0);

    let first = mesh.init_connectivity(1, 2) as *const Connectivity;
    let after_first = topology.num_computations();
    assert!(after_first > 0);

    let second = mesh.init_connectivity(1, 2) as *const Connectivity;
    assert_eq!(first, second);
    assert_eq!(topology.num_computations(), after_first);
    Ok(())
}

#[test]
fn iterating_twice_reuses_the_table() -> Result<(), Box<dyn std::error::Error>> {
    let mesh = unit_cube(1, 1, 1, CellType::Hexahedron)?;
    let count = |mesh: &Mesh| -> usize {
        mesh.vertices()
            .iter()
            .map(|v| v.entities::<Edge>().len())
            .sum()
    };
    let a = count(&mesh);
    let computed = mesh.topology().num_computations();
    let b = count(&mesh);
    assert_eq!(a, b);
    assert_eq!(a, 2 * mesh.num_entities(1));
    assert_eq!(mesh.topology().num_computations(), computed);
    Ok(())
}

#[test]
fn identity_and_transpose_tables() -> Result<(), Box<dyn std::error::Error>> {
    let mesh = unit_square(1, 1, CellType::Quadrilateral)?;
    let identity = mesh.init_connectivity(1, 1);
    assert_eq!(identity.num_entities(), 4);
    for (e, row) in identity.rows().enumerate() {
        assert_eq!(row, &[e]);
    }

    let edges_to_vertices = mesh.init_connectivity(1, 0);
    let vertices_to_edges = mesh.init_connectivity(0, 1);
    for (v, row) in vertices_to_edges.rows().enumerate() {
        assert!(row.windows(2).all(|w| w[0] < w[1]));
        for &e in row {
            assert!(edges_to_vertices.row(e).contains(&v));
        }
    }
    Ok(())
}

#[test]
fn face_to_edge_by_vertex_inclusion() -> Result<(), Box<dyn std::error::Error>> {
    let mesh = unit_cube(1, 1, 1, CellType::Tetrahedron)?;
    let faces_to_edges = mesh.init_connectivity(2, 1);
    assert_eq!(faces_to_edges.num_entities(), 18);
    for (f, row) in faces_to_edges.rows().enumerate() {
        assert_eq!(row.len(), 3);
        let face = mesh.init_connectivity(2, 0).row(f);
        for &e in row {
            let edge = mesh.init_connectivity(1, 0).row(e);
            assert!(edge.iter().all(|v| face.contains(v)));
        }
    }
    Ok(())
}

#[test]
fn invalidation_recomputes_on_demand() -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = unit_interval(4)?;
    let before: Vec<Vec<usize>> = mesh
        .init_connectivity(0, 1)
        .rows()
        .map(<[usize]>::to_vec)
        .collect();
    let computed = mesh.topology().num_computations();
    mesh.invalidate_cache();
    assert!(!mesh.topology().is_computed(0, 1));
    let after: Vec<Vec<usize>> = mesh
        .init_connectivity(0, 1)
        .rows()
        .map(<[usize]>::to_vec)
        .collect();
    assert_eq!(before, after);
    assert_eq!(mesh.topology().num_computations(), 2 * computed);
    Ok(())
}

#[test]
fn preloading_validates_shape() -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = unit_interval(2)?;
    let short = Connectivity::from_rows([vec![0]]);
    assert_eq!(
        mesh.set_connectivity(0, 1, short),
        Err(MeshError::ConnectivityShape {
            d0: 0,
            d1: 1,
            expected: 3,
            found: 1
        })
    );
    let dangling = Connectivity::from_rows([vec![0], vec![0, 5], vec![1]]);
    assert!(matches!(
        mesh.set_connectivity(0, 1, dangling),
        Err(MeshError::ConnectivityIndexOutOfRange { .. })
    ));
    assert_eq!(
        mesh.set_connectivity(1, 0, Connectivity::default()),
        Err(MeshError::ConnectivityNotPreloadable { d0: 1, d1: 0 })
    );
    Ok(())
}

#[test]
fn concurrent_readers_share_one_table() -> Result<(), Box<dyn std::error::Error>> {
    let mesh = unit_square(4, 4, CellType::Triangle)?;
    let totals: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    mesh.cells()
                        .iter()
                        .map(|c| c.entities::<Edge>().len())
                        .sum::<usize>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or(0)).collect()
    });
    assert!(totals.iter().all(|&t| t == 3 * mesh.num_cells()));
    Ok(())
}
