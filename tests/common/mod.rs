#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::Compression;
use flate2::Crc;
use flate2::write::DeflateEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy)]
pub enum Method {
    Stored,
    Deflate,
}

/// Build a minimal single-disk zip archive in memory
pub fn build_zip(entries: &[(&str, &[u8], Method)]) -> Vec<u8> {
    build_zip_with_comment(entries, b"")
}

pub fn build_zip_with_comment(entries: &[(&str, &[u8], Method)], comment: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for (name, data, method) in entries {
        let mut crc = Crc::new();
        crc.update(data);
        let (method_id, payload) = match method {
            Method::Stored => (0u16, data.to_vec()),
            Method::Deflate => {
                let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
                enc.write_all(data).unwrap();
                (8u16, enc.finish().unwrap())
            }
        };
        let offset = out.len() as u32;

        out.write_all(b"PK\x03\x04").unwrap();
        out.write_u16::<LittleEndian>(20).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.write_u16::<LittleEndian>(method_id).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.write_u16::<LittleEndian>(0x21).unwrap();
        out.write_u32::<LittleEndian>(crc.sum()).unwrap();
        out.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(data.len() as u32).unwrap();
        out.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.write_all(name.as_bytes()).unwrap();
        out.write_all(&payload).unwrap();

        central.write_all(b"PK\x01\x02").unwrap();
        central.write_u16::<LittleEndian>(20).unwrap();
        central.write_u16::<LittleEndian>(20).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(method_id).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(0x21).unwrap();
        central.write_u32::<LittleEndian>(crc.sum()).unwrap();
        central.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        central.write_u32::<LittleEndian>(data.len() as u32).unwrap();
        central.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u32::<LittleEndian>(0).unwrap();
        central.write_u32::<LittleEndian>(offset).unwrap();
        central.write_all(name.as_bytes()).unwrap();
    }

    let cd_offset = out.len() as u32;
    out.write_all(&central).unwrap();

    out.write_all(b"PK\x05\x06").unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
    out.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
    out.write_u32::<LittleEndian>(central.len() as u32).unwrap();
    out.write_u32::<LittleEndian>(cd_offset).unwrap();
    out.write_u16::<LittleEndian>(comment.len() as u16).unwrap();
    out.write_all(comment).unwrap();
    out
}

/// Write `bytes` to `name` inside `dir`
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

pub const SURVEY_KML: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>עצי פרי 2022</name>
    <Style id="icon-ci-6-normal">
      <IconStyle>
        <color>ff0000ff</color>
        <scale>1</scale>
        <Icon><href>images/icon-1.png</href></Icon>
      </IconStyle>
    </Style>
    <Style id="icon-ci-6-highlight">
      <IconStyle>
        <color>ff00ff00</color>
        <Icon><href>images/icon-2.png</href></Icon>
      </IconStyle>
    </Style>
    <StyleMap id="icon-ci-6">
      <Pair><key>normal</key><styleUrl>#icon-ci-6-normal</styleUrl></Pair>
      <Pair><key>highlight</key><styleUrl>#icon-ci-6-highlight</styleUrl></Pair>
    </StyleMap>
    <Style id="icon-959-009D57">
      <IconStyle>
        <color>ff579d00</color>
        <Icon><href>images/icon-3.png</href></Icon>
      </IconStyle>
    </Style>
    <Folder>
      <name>לימון</name>
      <Placemark>
        <name>&#x200E;לימון 1</name>
        <description><![CDATA[עץ לגיטימי]]></description>
        <styleUrl>#icon-ci-6</styleUrl>
        <Point><coordinates>34.78,32.08,0</coordinates></Point>
      </Placemark>
      <Placemark>
        <name>לימון 2</name>
        <description>עץ חצי לגיטימי</description>
        <styleUrl>#icon-ci-6</styleUrl>
        <Point><coordinates>34.79,32.09,0</coordinates></Point>
      </Placemark>
    </Folder>
    <Folder>
      <name>זית</name>
      <Placemark>
        <name>זית 1</name>
        <description>לא לגיטימי</description>
        <styleUrl>#icon-959-009D57</styleUrl>
        <Point><coordinates>34.80</coordinates></Point>
      </Placemark>
    </Folder>
    <Placemark>
      <name>ללא שכבה</name>
    </Placemark>
  </Document>
</kml>
"##;
