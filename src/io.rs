//! Output observers: CSV frames, station time series and binary snapshots,
//! plus the bathymetry profile reader.

use std::io::{self, BufRead, Write};

use bytemuck::bytes_of;
use faer_core::{zipped, MatRef};

use crate::{
    config::{ConfigError, SimConfig},
    driver::{ObsCtx, Observer, SimError},
    mesh::Grid,
    patch::{Dimension, WavePropagation},
    Float,
};

/// Reads a bathymetry profile from CSV, one value per line taken from the
/// last column.
///
/// Blank lines and `#` comments are skipped, as is a header in place of the
/// first record.
pub fn read_profile<R: BufRead>(input: R) -> Result<Vec<Float>, SimError> {
    let mut profile = Vec::new();
    let mut first = true;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let field = line.rsplit(',').next().unwrap_or(line).trim();
        match field.parse::<Float>() {
            Ok(value) => profile.push(value),
            Err(_) if first => {}
            Err(_) => {
                return Err(SimError::Parse {
                    line: index + 1,
                    value: field.to_string(),
                })
            }
        }
        first = false;
    }

    Ok(profile)
}

/// Writes the interior of `patch` as CSV, one row per cell centre, `x`
/// running fastest.
pub fn write_csv<W: Write>(
    mut out: W,
    x: Grid,
    y: Grid,
    patch: &WavePropagation,
) -> io::Result<()> {
    writeln!(out, "x,y,height,momentum_x,momentum_y,bathymetry")?;

    let (h, hu, hv, b) = (
        patch.height(),
        patch.momentum_x(),
        patch.momentum_y(),
        patch.bathymetry(),
    );
    let (nx, ny) = patch.cells();
    let y_of = |iy: usize| match patch.dimension() {
        Dimension::One => 0.0,
        Dimension::Two => y.center(iy),
    };

    for iy in 0..ny {
        for ix in 0..nx {
            writeln!(
                out,
                "{},{},{},{},{},{}",
                x.center(ix),
                y_of(iy),
                h.read(ix, iy),
                hu.read(ix, iy),
                hv.read(ix, iy),
                b.read(ix, iy),
            )?;
        }
    }

    out.flush()
}

/// Writes one CSV file per observed frame, obtained from `open(frame)`.
pub struct CsvWriter<F> {
    open: F,
    frame: usize,
}

impl<W: Write, F: FnMut(usize) -> io::Result<W>> CsvWriter<F> {
    pub fn new(open: F) -> Self {
        Self { open, frame: 0 }
    }

    fn write_frame(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        let out = (self.open)(self.frame)?;
        let config = ctx.config();
        write_csv(out, config.x(), config.y(), ctx.patch())?;
        self.frame += 1;
        Ok(())
    }
}

impl<W: Write, F: FnMut(usize) -> io::Result<W>> Observer for CsvWriter<F> {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        self.write_frame(ctx)
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        self.write_frame(ctx)
    }
}

/// One recording point of [`Stations`].
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    name: String,
    cell: (usize, usize),
    records: Vec<[Float; 4]>,
}

impl Station {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell `(ix, iy)` the station reads.
    pub fn cell(&self) -> (usize, usize) {
        self.cell
    }

    /// `[time, height, momentum_x, momentum_y]` per observed step.
    pub fn records(&self) -> &[[Float; 4]] {
        &self.records
    }

    fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "time,height,momentum_x,momentum_y")?;
        for [t, h, hu, hv] in &self.records {
            writeln!(out, "{t},{h},{hu},{hv}")?;
        }
        out.flush()
    }
}

/// Time series of the quantities at named positions, written at cleanup as
/// one CSV per station through `open(name)`.
pub struct Stations<F> {
    stations: Vec<Station>,
    open: F,
}

impl<W: Write, F: FnMut(&str) -> io::Result<W>> Stations<F> {
    /// Positions are physical coordinates; `y` is ignored by a 1D run.
    pub fn new(
        config: &SimConfig,
        positions: impl IntoIterator<Item = (String, Float, Float)>,
        open: F,
    ) -> Result<Self, ConfigError> {
        let stations = positions
            .into_iter()
            .map(|(name, x, y)| {
                let iy = if config.is_one_dimensional() {
                    Some(0)
                } else {
                    config.y().locate(y)
                };
                match (config.x().locate(x), iy) {
                    (Some(ix), Some(iy)) => Ok(Station {
                        name,
                        cell: (ix, iy),
                        records: Vec::new(),
                    }),
                    _ => Err(ConfigError::StationOutsideDomain { name, x, y }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { stations, open })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    fn record(&mut self, ctx: ObsCtx) {
        let (h, hu, hv) = (ctx.height(), ctx.momentum_x(), ctx.momentum_y());
        for station in &mut self.stations {
            let (ix, iy) = station.cell;
            station.records.push([
                ctx.time(),
                h.read(ix, iy),
                hu.read(ix, iy),
                hv.read(ix, iy),
            ]);
        }
    }
}

impl<W: Write, F: FnMut(&str) -> io::Result<W>> Observer for Stations<F> {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        self.record(ctx);
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        self.record(ctx);
        Ok(())
    }

    fn at_cleanup(&mut self, _ctx: ObsCtx) -> Result<(), SimError> {
        for station in &self.stations {
            station.write_csv((self.open)(&station.name)?)?;
        }
        Ok(())
    }
}

pub const SNAPSHOT_HEADER: &[u8] = b"SWE1";
const MARKER: [u8; 4] = [0xFF; 4];

/// Binary snapshots of `h`, `hu` and `hv`.
///
/// Layout: magic, float size as `u8`, `nx`, `ny`, sampling period and total
/// steps as `u32`, the `x` and `y` extents and the end time as floats, the
/// solver name (`u32` length then bytes), a marker, then per frame the time
/// followed by the three fields in column-major order. A final marker closes
/// the stream. Everything is native-endian.
pub struct SnapshotWriter<W> {
    output: W,
    scratch: Vec<Float>,
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            scratch: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    fn write_field(&mut self, m: MatRef<'_, Float>) -> io::Result<()> {
        let scratch = &mut self.scratch;
        scratch.clear();
        for j in 0..m.ncols() {
            zipped!(m.col(j)).for_each(|x| scratch.push(x.read()));
        }
        self.output.write_all(bytemuck::cast_slice(&self.scratch))
    }
}

impl<W: Write> Observer for SnapshotWriter<W> {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        let config = ctx.config();
        let (nx, ny) = ctx.patch().cells();
        let output = &mut self.output;

        output.write_all(SNAPSHOT_HEADER)?;
        output.write_all(bytes_of(&(std::mem::size_of::<Float>() as u8)))?;
        // dimensions
        output.write_all(bytes_of(&(nx as u32)))?;
        output.write_all(bytes_of(&(ny as u32)))?;
        output.write_all(bytes_of(&(ctx.sampling_period() as u32)))?;
        output.write_all(bytes_of(&(ctx.total_steps() as u32)))?;
        // bounds
        for grid in [config.x(), config.y()] {
            output.write_all(bytes_of(&grid.lower()))?;
            output.write_all(bytes_of(&grid.upper()))?;
        }
        output.write_all(bytes_of(&config.end_time()))?;
        // solver name
        let name = config.patch().solver.name().as_bytes();
        output.write_all(bytes_of(&(name.len() as u32)))?;
        output.write_all(name)?;

        output.write_all(&MARKER)?;

        // initial condition
        self.at_each_iteration(ctx)
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        self.output.write_all(bytes_of(&ctx.time()))?;
        self.write_field(ctx.height())?;
        self.write_field(ctx.momentum_x())?;
        self.write_field(ctx.momentum_y())?;
        Ok(())
    }

    fn at_cleanup(&mut self, _ctx: ObsCtx) -> Result<(), SimError> {
        self.output.write_all(&MARKER)?;
        self.output.flush().map_err(SimError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        driver::Driver,
        setup::{DamBreak1d, DamBreak2d},
        sim::Simulation,
    };

    fn dam_break(cells: usize) -> Simulation {
        let config = SimConfig::default()
            .with_x(10.0, cells)
            .with_end_time(0.1);
        Simulation::new(DamBreak1d::default(), config).unwrap()
    }

    fn exhausted() -> io::Error {
        io::Error::new(io::ErrorKind::Other, "no buffer left")
    }

    #[test]
    fn csv_lists_cell_centres() {
        let sim = dam_break(4);
        let mut out = Vec::new();
        write_csv(&mut out, sim.config().x(), sim.config().y(), sim.patch()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "x,y,height,momentum_x,momentum_y,bathymetry");
        assert_eq!(lines[1], "1.25,0,10,0,0,0");
        assert_eq!(lines[4], "8.75,0,5,0,0,0");
    }

    #[test]
    fn csv_writer_writes_one_frame_per_sample() {
        let mut frames: Vec<Vec<u8>> = vec![Vec::new(); 64];
        let mut slots = frames.iter_mut();

        let mut driver = Driver::new(dam_break(10))
            .with_time_sampling(2)
            .with_observer(CsvWriter::new(|_: usize| slots.next().ok_or_else(exhausted)));
        driver.run().unwrap();
        let steps = driver.simulation().step();
        drop(driver);

        let written = frames.iter().take_while(|f| !f.is_empty()).count();
        assert_eq!(written, 1 + steps / 2);
        for frame in &frames[..written] {
            assert_eq!(String::from_utf8_lossy(frame).lines().count(), 11);
        }
    }

    #[test]
    fn stations_record_time_series() {
        let config = SimConfig::default().with_x(10.0, 10).with_end_time(0.1);
        let sim = Simulation::new(DamBreak1d::default(), config.clone()).unwrap();

        let mut files: Vec<Vec<u8>> = vec![Vec::new(); 2];
        let mut slots = files.iter_mut();
        let mut stations = Stations::new(
            &config,
            [("left".to_string(), 1.0, 0.0), ("dam".to_string(), 5.2, 7.0)],
            |_: &str| slots.next().ok_or_else(exhausted),
        )
        .unwrap();
        assert_eq!(stations.stations()[0].cell(), (1, 0));
        assert_eq!(stations.stations()[1].cell(), (5, 0));

        let mut driver = Driver::new(sim)
            .with_time_sampling(1)
            .with_observer(&mut stations);
        driver.run().unwrap();
        let steps = driver.simulation().step();
        drop(driver);

        let left = &stations.stations()[0];
        assert_eq!(left.name(), "left");
        assert_eq!(left.records().len(), steps + 1);
        assert_eq!(left.records()[0], [0.0, 10.0, 0.0, 0.0]);
        // the dam is at x = 5, cell 5 starts at 5.0 and rises first
        assert!(stations.stations()[1].records()[steps][1] > 5.0);
        drop(stations);

        let dam = String::from_utf8(files.pop().unwrap()).unwrap();
        let mut lines = dam.lines();
        assert_eq!(lines.next(), Some("time,height,momentum_x,momentum_y"));
        assert_eq!(lines.next(), Some("0,5,0,0"));
        assert_eq!(dam.lines().count(), steps + 2);
    }

    #[test]
    fn station_outside_domain_is_rejected() {
        let config = SimConfig::default().with_x(10.0, 10).with_y(10.0, 10);
        let result = Stations::new(&config, [("far".to_string(), 5.0, 12.0)], |_: &str| {
            Ok(io::sink())
        });
        assert!(matches!(
            result,
            Err(ConfigError::StationOutsideDomain { ref name, .. }) if name == "far"
        ));
    }

    #[test]
    fn snapshot_layout() {
        let config = SimConfig::default()
            .with_x(100.0, 4)
            .with_y(100.0, 3)
            .with_end_time(1.0);
        let sim = Simulation::new(DamBreak2d::default(), config).unwrap();

        let mut bytes: Vec<u8> = Vec::new();
        let mut driver = Driver::new(sim)
            .with_time_sampling(5)
            .with_observer(SnapshotWriter::new(&mut bytes));
        driver.run().unwrap();
        let frames = 1 + driver.simulation().step() / 5;
        drop(driver);

        let float = std::mem::size_of::<Float>();
        let name = b"F-Wave";
        let header = 4 + 1 + 4 * 4 + 5 * float + 4 + name.len() + 4;
        let frame = float * (1 + 3 * 4 * 3);

        assert_eq!(&bytes[..4], SNAPSHOT_HEADER);
        assert_eq!(bytes[4] as usize, float);
        assert_eq!(&bytes[5..9], bytes_of(&4u32));
        assert_eq!(&bytes[9..13], bytes_of(&3u32));
        assert_eq!(
            &bytes[header - 8 - name.len()..header - 4 - name.len()],
            bytes_of(&(name.len() as u32))
        );
        assert_eq!(&bytes[header - 4 - name.len()..header - 4], name);
        assert_eq!(&bytes[header - 4..header], MARKER);
        assert_eq!(bytes.len(), header + frames * frame + 4);
        assert_eq!(&bytes[bytes.len() - 4..], MARKER);

        // first field of the initial frame is h in column-major order
        let h0 = header + float;
        let first: [Float; 2] = [
            bytemuck::pod_read_unaligned(&bytes[h0..h0 + float]),
            bytemuck::pod_read_unaligned(&bytes[h0 + float..h0 + 2 * float]),
        ];
        assert_eq!(first, [5.0, 5.0]);
    }

    #[test]
    fn profile_takes_last_column() {
        let csv = "x,y,distance,bathymetry\n\
                   0,0,0,-10.5\n\
                   # shelf\n\
                   \n\
                   1,1,250, 3\n";
        assert_eq!(read_profile(csv.as_bytes()).unwrap(), vec![-10.5, 3.0]);

        let plain = "-1\n-2\n";
        assert_eq!(read_profile(plain.as_bytes()).unwrap(), vec![-1.0, -2.0]);
    }

    #[test]
    fn profile_rejects_garbage() {
        let csv = "distance,bathymetry\n0,-1\n250,deep\n";
        assert!(matches!(
            read_profile(csv.as_bytes()),
            Err(SimError::Parse { line: 3, ref value }) if value == "deep"
        ));
    }
}
