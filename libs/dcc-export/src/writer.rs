use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pfs_model::Sample;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::{ExportConfig, ExportError, SpecimenRecord};

/// Namespace of the `centreSpecimenSet` document.
pub const SPECIMEN_NS: &str =
    "http://www.mousephenotype.org/dcc/exportlibrary/datastructure/core/specimen";

/// Write one `centreSpecimenSet` holding a single `centre` with one `mouse`
/// element per sample, in input order.
pub fn write_specimen_set<W: Write>(
    out: W,
    samples: &[Sample],
    config: &ExportConfig,
) -> Result<(), ExportError> {
    let mut xml = Writer::new_with_indent(out, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("centreSpecimenSet");
    root.push_attribute(("xmlns", SPECIMEN_NS));
    xml.write_event(Event::Start(root))?;

    let mut centre = BytesStart::new("centre");
    centre.push_attribute(("centreID", config.centre_id.as_str()));
    xml.write_event(Event::Start(centre))?;

    for sample in samples {
        let record = SpecimenRecord::from_sample(sample, config);
        let mut mouse = BytesStart::new("mouse");
        for attr in record.attributes() {
            mouse.push_attribute(attr);
        }
        xml.write_event(Event::Empty(mouse))?;
    }

    xml.write_event(Event::End(BytesEnd::new("centre")))?;
    xml.write_event(Event::End(BytesEnd::new("centreSpecimenSet")))?;
    xml.into_inner().flush()?;
    Ok(())
}

/// Write the manifest to `path`, replacing any existing file.
pub fn write_specimen_file(
    path: &Path,
    samples: &[Sample],
    config: &ExportConfig,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::file(path.display().to_string(), e))?;
    write_specimen_set(BufWriter::new(file), samples, config)?;
    tracing::info!(path = %path.display(), count = samples.len(), "wrote specimen manifest");
    Ok(())
}
