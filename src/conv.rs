use crate::{
    commands::Command,
    utils::{kegg_client, output_to_writer},
};
use log::info;

#[derive(serde::Serialize, Debug)]
struct Row<'a> {
    source_id: &'a str,
    target_id: &'a str,
}

pub fn conv(cmd: &Command) -> anyhow::Result<()> {
    match cmd {
        Command::Conv {
            target,
            source,
            output,
            kegg,
        } => {
            let client = kegg_client(kegg)?;
            let pairs = client.conv(target, source)?;
            info!("{} {} to {} conversion(s)", pairs.len(), source, target);

            let mut writer = csv::WriterBuilder::new()
                .delimiter(b'\t')
                .from_writer(output_to_writer(output)?);
            for (from, to) in &pairs {
                writer.serialize(Row {
                    source_id: from,
                    target_id: to,
                })?;
            }
            writer.flush()?;
        }
        _ => panic!("input command is not for conv"),
    }
    Ok(())
}
