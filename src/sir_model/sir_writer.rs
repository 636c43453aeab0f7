use {
    serde_json::Value,
    std::{
        fs::File,
        io::{Write, BufWriter}
    },
    super::*,
};

/// # Writes S I R tables as whitespace separated columns
/// * header lines start with `#`, the first ones are the json parameters
pub struct CurveWriter
{
    writer: BufWriter<File>,
}

impl CurveWriter
{
    pub fn new(path: &str) -> std::io::Result<Self>
    {
        let file = File::create(path)?;
        Ok(
            Self{
                writer: BufWriter::new(file)
            }
        )
    }

    pub fn write_header(&mut self, jsons: &[Value]) -> std::io::Result<()>
    {
        write_jsons(jsons, &mut self.writer)?;
        writeln!(self.writer, "#T S I R")
    }

    /// extra `#` line, e.g. a summary
    pub fn write_comment(&mut self, comment: &str) -> std::io::Result<()>
    {
        writeln!(self.writer, "#{comment}")
    }

    pub fn write_row(&mut self, row: &SirRow) -> std::io::Result<()>
    {
        writeln!(self.writer, "{:E} {} {} {}", row.t, row.s, row.i, row.r)
    }

    pub fn write_table(&mut self, table: &SirTable) -> std::io::Result<()>
    {
        for row in table.rows.iter()
        {
            self.write_row(row)?;
        }
        Ok(())
    }

    pub fn write_trajectory(&mut self, trajectory: &Trajectory) -> std::io::Result<()>
    {
        for row in trajectory.rows()
        {
            self.write_row(&row)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> std::io::Result<()>
    {
        self.writer.flush()
    }
}

pub fn write_jsons<W: Write>(jsons: &[Value], mut writer: W) -> std::io::Result<()>
{
    for j in jsons{
        write!(writer, "#")?;
        serde_json::to_writer(&mut writer, j)?;
        writeln!(writer)?;
    }
    Ok(())
}
