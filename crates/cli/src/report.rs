//! File ingestion, classification, and report formatting.
//!
//! Purpose
//! - Implement both subcommands: load the polygon outline and split pairs,
//!   drive the mesh through them, classify site records into faces, and
//!   write the per-face report plus an optional JSON summary.
//!
//! Formats
//! - Polygon: whitespace-separated `x y` coordinate pairs, clockwise.
//! - Splits: one `e1 e2` edge-id pair per line; blank lines are skipped.
//! - Sites: csv with header `id, postcode, population, contact, x, y`,
//!   ingested with Polars; id and postcode are read as text even when they
//!   look numeric.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::Serialize;

use plat::{EdgeId, FaceId, Mesh, Vec2};

/// One point-attribute record to classify into a face.
#[derive(Clone, Debug)]
pub struct Site {
    pub id: String,
    pub postcode: String,
    pub population: i64,
    pub contact: String,
    pub pos: Vec2<f64>,
}

/// Machine-readable counterpart of the text report.
#[derive(Serialize)]
struct Summary {
    vertices: usize,
    faces: usize,
    edges: usize,
    sites: usize,
    /// Sites contained in no face (on a boundary or outside the polygon).
    unassigned: usize,
    per_face: Vec<FaceSummary>,
}

#[derive(Serialize)]
struct FaceSummary {
    face: usize,
    sites: usize,
    population: i64,
}

pub fn run_report(
    sites_path: &Path,
    polygon: &Path,
    splits: Option<&Path>,
    out: &Path,
    summary_path: Option<&Path>,
    check: bool,
) -> Result<()> {
    let sites = read_sites(sites_path)?;
    tracing::info!(sites = sites.len(), "sites_read");

    let mesh = build_mesh(polygon, splits, check)?;
    let per_face = classify(&mesh, &sites);
    let assigned: usize = per_face.iter().map(Vec::len).sum();
    tracing::info!(
        faces = mesh.num_faces(),
        assigned,
        unassigned = sites.len() - assigned,
        "sites_classified"
    );

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report dir {}", parent.display()))?;
        }
    }
    fs::write(out, format_report(&sites, &per_face))
        .with_context(|| format!("writing report {}", out.display()))?;

    if let Some(path) = summary_path {
        let summary = Summary {
            vertices: mesh.num_vertices(),
            faces: mesh.num_faces(),
            edges: mesh.num_edges(),
            sites: sites.len(),
            unassigned: sites.len() - assigned,
            per_face: per_face
                .iter()
                .enumerate()
                .map(|(face, members)| FaceSummary {
                    face,
                    sites: members.len(),
                    population: members.iter().map(|&w| sites[w].population).sum(),
                })
                .collect(),
        };
        fs::write(path, serde_json::to_vec_pretty(&summary)?)
            .with_context(|| format!("writing summary {}", path.display()))?;
    }
    Ok(())
}

pub fn run_inspect(polygon: &Path, splits: Option<&Path>, check: bool) -> Result<()> {
    let mesh = build_mesh(polygon, splits, check)?;
    tracing::info!(
        vertices = mesh.num_vertices(),
        faces = mesh.num_faces(),
        edges = mesh.num_edges(),
        "mesh_built"
    );
    println!("{mesh}");
    Ok(())
}

/// Build the mesh from the outline file and apply the split pairs in order.
/// With `check` set, the structural invariants are verified after the build
/// and after every split.
fn build_mesh(polygon: &Path, splits: Option<&Path>, check: bool) -> Result<Mesh> {
    let outline = read_polygon(polygon)?;
    let mut mesh = Mesh::from_points(&outline)
        .with_context(|| format!("building mesh from {}", polygon.display()))?;
    if check {
        mesh.check_invariants().context("after build")?;
    }
    if let Some(path) = splits {
        for (i, (e1, e2)) in read_splits(path)?.into_iter().enumerate() {
            let split = mesh
                .split_face(e1, e2)
                .with_context(|| format!("split {i}: {e1:?} {e2:?}"))?;
            tracing::info!(
                split = i,
                kept = split.kept.0,
                created = split.created.0,
                "split_face"
            );
            if check {
                mesh.check_invariants()
                    .with_context(|| format!("after split {i}"))?;
            }
        }
    }
    Ok(mesh)
}

fn read_polygon(path: &Path) -> Result<Vec<Vec2<f64>>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading polygon {}", path.display()))?;
    let nums = text
        .split_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .with_context(|| format!("polygon {}: bad coordinate {tok:?}", path.display()))
        })
        .collect::<Result<Vec<f64>>>()?;
    if nums.len() % 2 != 0 {
        bail!(
            "polygon {}: odd number of coordinates ({})",
            path.display(),
            nums.len()
        );
    }
    Ok(nums.chunks(2).map(|c| Vec2::new(c[0], c[1])).collect())
}

fn read_splits(path: &Path) -> Result<Vec<(EdgeId, EdgeId)>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading splits {}", path.display()))?;
    let mut pairs = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<usize>().with_context(|| {
                    format!("splits {} line {}: bad edge id {tok:?}", path.display(), lineno + 1)
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        if fields.len() != 2 {
            bail!(
                "splits {} line {}: expected `e1 e2`, got {line:?}",
                path.display(),
                lineno + 1
            );
        }
        pairs.push((EdgeId(fields[0]), EdgeId(fields[1])));
    }
    Ok(pairs)
}

/// Read site records with Polars. Schema inference may type id or postcode as
/// integers, so both are cast back to text before extraction.
fn read_sites(path: &Path) -> Result<Vec<Site>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening sites csv {}", path.display()))?
        .collect()
        .with_context(|| format!("reading sites csv {}", path.display()))?;

    let id_col = df.column("id")?.cast(&DataType::String)?;
    let ids = id_col.str()?;
    let postcode_col = df.column("postcode")?.cast(&DataType::String)?;
    let postcodes = postcode_col.str()?;
    let population_col = df.column("population")?.cast(&DataType::Int64)?;
    let populations = population_col.i64()?;
    let contact_col = df.column("contact")?.cast(&DataType::String)?;
    let contacts = contact_col.str()?;
    let x_col = df.column("x")?.cast(&DataType::Float64)?;
    let xs = x_col.f64()?;
    let y_col = df.column("y")?.cast(&DataType::Float64)?;
    let ys = y_col.f64()?;

    let mut sites = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        sites.push(Site {
            id: ids
                .get(row)
                .with_context(|| format!("sites csv row {row}: null id"))?
                .to_string(),
            postcode: postcodes
                .get(row)
                .with_context(|| format!("sites csv row {row}: null postcode"))?
                .to_string(),
            population: populations
                .get(row)
                .with_context(|| format!("sites csv row {row}: null population"))?,
            contact: contacts
                .get(row)
                .with_context(|| format!("sites csv row {row}: null contact"))?
                .to_string(),
            pos: Vec2::new(
                xs.get(row)
                    .with_context(|| format!("sites csv row {row}: null x"))?,
                ys.get(row)
                    .with_context(|| format!("sites csv row {row}: null y"))?,
            ),
        });
    }
    Ok(sites)
}

/// Indices of the sites contained in each face, in face id order. A site on
/// a face boundary is contained in no face.
fn classify(mesh: &Mesh, sites: &[Site]) -> Vec<Vec<usize>> {
    (0..mesh.num_faces())
        .map(|f| {
            sites
                .iter()
                .enumerate()
                .filter(|(_, site)| mesh.face_contains(FaceId(f), site.pos))
                .map(|(w, _)| w)
                .collect()
        })
        .collect()
}

/// Face-by-face site listing, then one population line per face.
fn format_report(sites: &[Site], per_face: &[Vec<usize>]) -> String {
    let mut text = String::new();
    for (f, members) in per_face.iter().enumerate() {
        text.push_str(&format!("face {f}:\n"));
        for &w in members {
            let s = &sites[w];
            text.push_str(&format!(
                "site {}: postcode {}, population {}, contact {}, x {:.6}, y {:.6}\n",
                s.id, s.postcode, s.population, s.contact, s.pos.x, s.pos.y
            ));
        }
    }
    for (f, members) in per_face.iter().enumerate() {
        let population: i64 = members.iter().map(|&w| sites[w].population).sum();
        text.push_str(&format!("face {f} population served: {population}\n"));
    }
    text
}
