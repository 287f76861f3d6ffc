use crate::model::ReportData;

/// Render a self-contained HTML report (data embedded as JSON, charts drawn as SVG).
///
/// Important: we avoid `format!()` because the HTML contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_html_report(data: &ReportData) -> anyhow::Result<String> {
    // `</` inside a string literal would close the script element early.
    let json = serde_json::to_string(data)?.replace("</", "<\\/");

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>MST Benchmark Report</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  main { padding: 12px 16px; }
  h2 { font-size: 18px; margin: 20px 0 8px; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  .muted { color: #777; font-size: 12px; }

  .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(480px, 1fr)); gap: 16px; }
  .chart { border: 1px solid #eee; border-radius: 6px; padding: 8px; }
  .chart h3 { font-size: 14px; margin: 0 0 4px; }
  .legend { display: flex; gap: 10px; flex-wrap: wrap; font-size: 12px; }
  .swatch { display: inline-block; width: 10px; height: 10px; margin-right: 4px; border-radius: 2px; }

  table { border-collapse: collapse; margin-top: 8px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: left; font-size: 14px; }
  th { background: white; border-bottom: 1px solid #ddd; }
  .num { text-align: right; font-variant-numeric: tabular-nums; }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>

<main>
  <h2>Recommendations</h2>
  <ul id="recommendations"></ul>

  <h2>Charts</h2>
  <div class="grid" id="charts"></div>

  <h2>Relative performance (mean time / fastest, per vertex count)</h2>
  <div id="ranking"></div>

  <h2 id="exponentsTitle">Empirical complexity</h2>
  <div id="exponents"></div>

  <h2>Summary statistics</h2>
  <div id="stats"></div>
</main>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;

const COLORS = ["#1f77b4", "#d62728", "#2ca02c", "#ff7f0e", "#9467bd", "#8c564b", "#e377c2", "#17becf"];
const W = 460, H = 280, PAD = { l: 56, r: 12, t: 10, b: 48 };

function fmt(x, digits) {
  if (x === null || x === undefined) return "-";
  return Number(x).toFixed(digits === undefined ? 2 : digits);
}

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function renderSummary() {
  const t = DATA.totals;
  document.getElementById("summary").innerHTML = `
    <span class="pill">source: <b>${escapeHtml(t.source)}</b></span>
    <span class="pill">records: <b>${t.records}</b></span>
    <span class="pill">failed trials dropped: <b>${t.dropped_trials}</b></span>
    <span class="pill">algorithms: <b>${t.algorithms.length}</b></span>
    <span class="pill">sizes: <b>${t.vertex_sizes.join(", ")}</b></span>
    <span class="pill">densities: <b>${t.densities.join(", ")}</b></span>
  `;
}

function renderRecommendations() {
  const el = document.getElementById("recommendations");
  if (!DATA.recommendations.length) {
    el.innerHTML = `<li class="muted">no bucket matched any rows</li>`;
    return;
  }
  el.innerHTML = DATA.recommendations
    .map(r => `<li>${escapeHtml(r.bucket)}: <b>${escapeHtml(r.algorithm)}</b> <span class="muted">(mean ${fmt(r.mean)})</span></li>`)
    .join("");
}

function axis(scale, lo, hi, size, flip) {
  const f = scale === "log" ? Math.log10 : (v => v);
  let a = f(lo), b = f(hi);
  if (a === b) { a -= 1; b += 1; }
  return v => {
    const p = (f(v) - a) / (b - a);
    return flip ? size - p * size : p * size;
  };
}

function renderChart(chart, idx) {
  const box = document.createElement("div");
  box.className = "chart";
  box.innerHTML = `<h3>${escapeHtml(chart.title)}</h3>`;

  const points = chart.series.flatMap(s => s.y.map((y, i) => [s.x[i], y]))
    .filter(([x, y]) => (chart.x_scale !== "log" || x > 0) && (chart.y_scale !== "log" || y > 0));
  if (!points.length) {
    box.innerHTML += `<div class="muted">no data</div>`;
    return box;
  }

  const iw = W - PAD.l - PAD.r, ih = H - PAD.t - PAD.b;
  const bar = chart.kind === "bar";
  const ys = points.map(p => p[1]).concat(chart.reference === null ? [] : [chart.reference]);
  const yLo = chart.y_scale === "log" ? Math.min(...ys) : Math.min(0, ...ys);
  const sy = axis(chart.y_scale, yLo, Math.max(...ys), ih, true);
  const n = bar ? chart.categories.length : 0;
  const xs = points.map(p => p[0]);
  const sx = bar ? (v => (v + 0.5) * iw / n) : axis(chart.x_scale, Math.min(...xs), Math.max(...xs), iw, false);

  let svg = `<svg width="${W}" height="${H}"><g transform="translate(${PAD.l},${PAD.t})">`;
  svg += `<line x1="0" y1="${ih}" x2="${iw}" y2="${ih}" stroke="#999"/><line x1="0" y1="0" x2="0" y2="${ih}" stroke="#999"/>`;

  for (let k = 0; k <= 4; k++) {
    const lo = chart.y_scale === "log" ? Math.log10(yLo) : yLo;
    const hi = chart.y_scale === "log" ? Math.log10(Math.max(...ys)) : Math.max(...ys);
    const t = lo + (hi - lo) * k / 4;
    const v = chart.y_scale === "log" ? Math.pow(10, t) : t;
    svg += `<text x="-6" y="${sy(v) + 4}" font-size="10" text-anchor="end">${fmt(v, v < 10 ? 2 : 0)}</text>`;
  }

  if (chart.reference !== null) {
    svg += `<line x1="0" x2="${iw}" y1="${sy(chart.reference)}" y2="${sy(chart.reference)}" stroke="#000" stroke-dasharray="4 3"/>`;
  }

  chart.series.forEach((s, si) => {
    const color = COLORS[(si + idx) % COLORS.length];
    if (bar) {
      const bw = Math.max(2, iw / n * 0.7);
      s.x.forEach((x, i) => {
        const y0 = sy(Math.max(yLo, 0)), y1 = sy(s.y[i]);
        svg += `<rect x="${sx(x) - bw / 2}" y="${Math.min(y0, y1)}" width="${bw}" height="${Math.abs(y0 - y1)}" fill="${color}" opacity="0.75"><title>${escapeHtml(chart.categories[x])}: ${fmt(s.y[i])}</title></rect>`;
      });
    } else {
      const pts = s.x.map((x, i) => [x, s.y[i]])
        .filter(([x, y]) => (chart.x_scale !== "log" || x > 0) && (chart.y_scale !== "log" || y > 0));
      svg += `<polyline fill="none" stroke="${color}" stroke-width="2" points="${pts.map(([x, y]) => `${sx(x)},${sy(y)}`).join(" ")}"/>`;
      for (const [x, y] of pts) {
        svg += `<circle cx="${sx(x)}" cy="${sy(y)}" r="3" fill="${color}"><title>${escapeHtml(s.label)} (${x}, ${fmt(y)})</title></circle>`;
      }
    }
  });

  if (bar) {
    chart.categories.forEach((c, i) => {
      svg += `<text font-size="9" transform="translate(${sx(i)},${ih + 10}) rotate(25)">${escapeHtml(c.length > 24 ? c.slice(0, 23) + "…" : c)}</text>`;
    });
  } else {
    const uniq = [...new Set(xs)].sort((a, b) => a - b);
    for (const x of uniq) {
      svg += `<text x="${sx(x)}" y="${ih + 14}" font-size="10" text-anchor="middle">${x}</text>`;
    }
  }
  svg += `<text x="${iw / 2}" y="${ih + 42}" font-size="11" text-anchor="middle">${escapeHtml(chart.x_label)}</text>`;
  svg += `<text transform="translate(-44,${ih / 2}) rotate(-90)" font-size="11" text-anchor="middle">${escapeHtml(chart.y_label)}</text>`;
  svg += `</g></svg>`;

  const legend = chart.series
    .map((s, si) => `<span><span class="swatch" style="background:${COLORS[(si + idx) % COLORS.length]}"></span>${escapeHtml(s.label)}</span>`)
    .join("");
  box.innerHTML += svg + `<div class="legend">${legend}</div>`;
  return box;
}

function renderCharts() {
  const root = document.getElementById("charts");
  DATA.charts.forEach((c, i) => root.appendChild(renderChart(c, i)));
}

function heat(v) {
  // 1 = best (green), >= 4 = worst (red)
  const p = Math.min(1, Math.max(0, (Math.log2(v)) / 2));
  return `hsl(${120 - 120 * p}, 70%, 80%)`;
}

function renderRanking() {
  const t = DATA.ranking;
  const el = document.getElementById("ranking");
  if (!t.row_labels.length) {
    el.innerHTML = `<div class="muted">no data</div>`;
    return;
  }
  let html = `<table><thead><tr><th>vertices</th>${t.column_labels.map(c => `<th class="num">${escapeHtml(c)}</th>`).join("")}</tr></thead><tbody>`;
  t.matrix.forEach((row, i) => {
    html += `<tr><td><code>${escapeHtml(t.row_labels[i])}</code></td>`;
    html += row.map(v => v === null
      ? `<td class="num muted">-</td>`
      : `<td class="num" style="background:${heat(v)}">${fmt(v)}</td>`).join("");
    html += `</tr>`;
  });
  el.innerHTML = html + `</tbody></table>`;
}

function renderExponents() {
  if (DATA.exponent_density !== null) {
    document.getElementById("exponentsTitle").textContent = `Empirical complexity (density = ${DATA.exponent_density})`;
  }
  const bounds = new Map(DATA.complexities.map(c => [c.algorithm, c.bound]));
  const el = document.getElementById("exponents");
  if (!DATA.exponents.length) {
    el.innerHTML = `<div class="muted">fewer than 3 graph sizes per algorithm</div>`;
    return;
  }
  el.innerHTML = `<table><thead><tr><th>algorithm</th><th class="num">exponent</th><th class="num">sizes</th><th>theoretical</th></tr></thead><tbody>` +
    DATA.exponents.map(f => `<tr><td>${escapeHtml(f.algorithm)}</td><td class="num">${fmt(f.exponent, 3)}</td><td class="num">${f.sample_count}</td><td>${escapeHtml(bounds.get(f.algorithm) || "-")}</td></tr>`).join("") +
    `</tbody></table>`;
}

function renderStats() {
  document.getElementById("stats").innerHTML = `<table><thead><tr>
      <th>algorithm</th><th class="num">trials</th>
      <th class="num">time mean</th><th class="num">time std</th><th class="num">time min</th><th class="num">time max</th>
      <th class="num">memory mean</th><th class="num">memory std</th>
    </tr></thead><tbody>` +
    DATA.summary.map(r => `<tr>
      <td>${escapeHtml(r.algorithm)}${r.parallel ? ` <span class="muted">(parallel)</span>` : ""}</td>
      <td class="num">${r.trials}</td>
      <td class="num">${fmt(r.time_mean)}</td><td class="num">${fmt(r.time_std)}</td>
      <td class="num">${fmt(r.time_min)}</td><td class="num">${fmt(r.time_max)}</td>
      <td class="num">${fmt(r.memory_mean)}</td><td class="num">${fmt(r.memory_std)}</td>
    </tr>`).join("") + `</tbody></table>`;
}

renderSummary();
renderRecommendations();
renderCharts();
renderRanking();
renderExponents();
renderStats();
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
