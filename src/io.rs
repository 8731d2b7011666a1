use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::graph::Graph;

/// Read a graph from the semicolon-separated CSR text format.
///
/// The first line holds the vertex count, the second the concatenated
/// adjacency lists, the third the `vertex count + 1` offsets. Lines after
/// the third are ignored; legacy files carry vertex-group data there that
/// the engine never consumed.
pub fn read_graph(file_path: &Path) -> Result<Graph> {
    let file = File::open(file_path)
        .with_context(|| format!("could not open graph file {}", file_path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let vertex_count = lines
        .next()
        .context("graph file is missing the vertex count line")??
        .trim()
        .parse::<usize>()
        .context("could not parse vertex count")?;
    let neighbors_line = lines.next().context("graph file is missing the neighbor line")??;
    let neighbors = parse_id_line(&neighbors_line).context("could not parse neighbor line")?;
    let offsets_line = lines.next().context("graph file is missing the offsets line")??;
    let offsets = parse_id_line(&offsets_line).context("could not parse offsets line")?;

    let graph = Graph::from_parts(vertex_count, neighbors, offsets)?;
    Ok(graph)
}

/// A semicolon-separated list of ids; an empty line means no ids at all.
fn parse_id_line(line: &str) -> Result<Vec<usize>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(';')
        .map(|token| {
            token
                .trim()
                .parse::<usize>()
                .with_context(|| format!("could not parse id {token:?}"))
        })
        .collect()
}

/// Write a graph in the same three-line format [`read_graph`] accepts.
pub fn write_graph(graph: &Graph, file_path: &Path) -> Result<()> {
    let mut file = File::create(file_path)
        .with_context(|| format!("could not create graph file {}", file_path.display()))?;

    let mut neighbors: Vec<String> = Vec::new();
    let mut offsets = vec![0];
    let mut running = 0;
    for vertex in 0..graph.len() {
        let row = graph.neighbors(vertex);
        running += row.len();
        offsets.push(running);
        neighbors.extend(row.iter().map(ToString::to_string));
    }
    let offsets: Vec<String> = offsets.iter().map(ToString::to_string).collect();

    writeln!(file, "{}", graph.len())?;
    writeln!(file, "{}", neighbors.join(";"))?;
    writeln!(file, "{}", offsets.join(";"))?;
    Ok(())
}

/// Write a partitioning result: the part count and the cut-edge count on
/// the first two lines, then one line per part holding its size followed
/// by its member ids.
pub fn write_partition_result(
    file_path: &Path,
    cut_edges: usize,
    parts: &[Vec<usize>],
) -> Result<()> {
    let mut file = File::create(file_path)
        .with_context(|| format!("could not create result file {}", file_path.display()))?;

    writeln!(file, "{}", parts.len())?;
    writeln!(file, "{cut_edges}")?;
    for members in parts {
        write!(file, "{}", members.len())?;
        for vertex in members {
            write!(file, " {vertex}")?;
        }
        writeln!(file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    use super::{read_graph, write_graph, write_partition_result};
    use crate::graph::{Graph, StructureError};

    fn create_mock_file(dir: &Path, filename: &str, content: &str) -> String {
        let file_path = dir.join(filename);
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_read_graph_parses_the_three_lines() -> Result<(), std::io::Error> {
        // Arrange: a triangle.
        let temp_dir = tempdir()?;
        let content = "3\n1;2;0;2;0;1\n0;2;4;6\n";
        let graph_file_path = create_mock_file(temp_dir.path(), "triangle.graph", content);

        // Act
        let graph = read_graph(Path::new(&graph_file_path)).unwrap();

        // Assert
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.neighbors(0), &[1, 2]);

        Ok(())
    }

    #[test]
    fn test_read_graph_ignores_trailing_lines() -> Result<(), std::io::Error> {
        // Arrange: a legacy file with two group lines after the offsets.
        let temp_dir = tempdir()?;
        let content = "2\n1;0\n0;1;2\n1;1\n0;1\n";
        let graph_file_path = create_mock_file(temp_dir.path(), "legacy.graph", content);

        // Act
        let graph = read_graph(Path::new(&graph_file_path)).unwrap();

        // Assert
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 1);

        Ok(())
    }

    #[test]
    fn test_read_graph_accepts_empty_neighbor_line() -> Result<(), std::io::Error> {
        // Arrange: a single vertex with no edges.
        let temp_dir = tempdir()?;
        let content = "1\n\n0;0\n";
        let graph_file_path = create_mock_file(temp_dir.path(), "lonely.graph", content);

        // Act
        let graph = read_graph(Path::new(&graph_file_path)).unwrap();

        // Assert
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.neighbors(0), &[] as &[usize]);

        Ok(())
    }

    #[test]
    fn test_read_graph_rejects_inconsistent_offsets() -> Result<(), std::io::Error> {
        // Arrange: the offsets line claims one entry too few.
        let temp_dir = tempdir()?;
        let content = "2\n1;0\n0;1\n";
        let graph_file_path = create_mock_file(temp_dir.path(), "broken.graph", content);

        // Act
        let result = read_graph(Path::new(&graph_file_path));

        // Assert: the structural error comes through the anyhow chain.
        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<StructureError>(),
            Some(StructureError::OffsetsLen { expected: 3, actual: 2 })
        ));

        Ok(())
    }

    #[test]
    fn test_read_graph_rejects_unparsable_ids() -> Result<(), std::io::Error> {
        // Arrange
        let temp_dir = tempdir()?;
        let content = "2\n1;zero\n0;1;2\n";
        let graph_file_path = create_mock_file(temp_dir.path(), "garbled.graph", content);

        // Act
        let result = read_graph(Path::new(&graph_file_path));

        // Assert
        assert!(result.is_err());

        Ok(())
    }

    #[test]
    fn test_written_graph_reads_back() -> Result<(), std::io::Error> {
        // Arrange: two triangles joined by one edge.
        let temp_dir = tempdir()?;
        let graph = Graph::from_edges(
            6,
            &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        );
        let graph_file_path = temp_dir.path().join("bridged.graph");

        // Act
        write_graph(&graph, &graph_file_path).unwrap();
        let read_back = read_graph(&graph_file_path).unwrap();

        // Assert
        assert_eq!(read_back.len(), graph.len());
        for vertex in 0..graph.len() {
            assert_eq!(read_back.neighbors(vertex), graph.neighbors(vertex));
        }

        Ok(())
    }

    #[test]
    fn test_write_partition_result_format() -> Result<(), std::io::Error> {
        // Arrange
        let temp_dir = tempdir()?;
        let result_file_path = temp_dir.path().join("parts.result");
        let parts = vec![vec![0, 2], vec![1]];

        // Act
        write_partition_result(&result_file_path, 2, &parts).unwrap();

        // Assert
        let written = std::fs::read_to_string(&result_file_path)?;
        assert_eq!(written, "2\n2\n2 0 2\n1 1\n");

        Ok(())
    }
}
