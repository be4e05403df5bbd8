use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use canpl_terminal::compliance::club_rows;
use canpl_terminal::csv::parse_rows;
use canpl_terminal::roster_fetch::parse_players_csv;

fn generated_players_csv(rows: usize) -> String {
    let mut out = String::from(
        "id,clubSlug,club,name,position,birthDate,nationality,number,notes,status,captain,2025,2026\n",
    );
    let clubs = [
        ("forge", "Forge FC"),
        ("cavalry", "Cavalry FC"),
        ("pacific", "Pacific FC"),
        ("atletico-ottawa", "Atlético Ottawa"),
    ];
    for i in 0..rows {
        let (slug, club) = clubs[i % clubs.len()];
        let status = match i % 13 {
            0 => "International",
            1 => "EYT",
            2 => "Club Option",
            _ => "Domestic",
        };
        out.push_str(&format!(
            "p-{i},{slug},{club},\"Player, {i}\",MF,{:04}-06-15,CA,{},Signed for 2025,Active,,{status},Domestic\n",
            1990 + (i % 18),
            (i % 30) + 1,
        ));
    }
    out
}

fn bench_raw_rows(c: &mut Criterion) {
    let csv = generated_players_csv(400);
    c.bench_function("csv_parse_rows", |b| {
        b.iter(|| {
            let rows = parse_rows(black_box(&csv));
            black_box(rows.len());
        })
    });
}

fn bench_players_parse(c: &mut Criterion) {
    let csv = generated_players_csv(400);
    c.bench_function("players_parse", |b| {
        b.iter(|| {
            let players = parse_players_csv(black_box(&csv)).unwrap();
            black_box(players.len());
        })
    });
}

fn bench_compliance_rows(c: &mut Criterion) {
    let csv = generated_players_csv(400);
    let players = parse_players_csv(&csv).unwrap();
    c.bench_function("compliance_rows", |b| {
        b.iter(|| {
            let rows = club_rows(black_box(&players), black_box(2025));
            black_box(rows.len());
        })
    });
}

criterion_group!(parse, bench_raw_rows, bench_players_parse, bench_compliance_rows);
criterion_main!(parse);
