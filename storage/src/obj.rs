use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use terrain_core::Mesh;

// Wavefront OBJ: one `v` per vertex, one `f` per triangle (1-based)
pub fn write_obj<W: Write>(mesh: &Mesh, mut out: W) -> io::Result<()> {
    writeln!(out, "# terrain {}x{}", mesh.width(), mesh.depth())?;
    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for tri in mesh.indices().chunks_exact(3) {
        writeln!(out, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
    }
    out.flush()
}

pub fn save_obj(mesh: &Mesh, path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    write_obj(mesh, BufWriter::new(file))
}
