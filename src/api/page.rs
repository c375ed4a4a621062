//! The dashboard page. Holds the record-count slider and renders whatever
//! `/api/dashboard` returns: the table and three Plotly charts, or the
//! failure message in their place.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>T20 International Batting Records</title>
    <script src="https://cdn.plot.ly/plotly-2.35.0.min.js"></script>
    <style>
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px 40px;
            background: #fafafa;
            color: #262730;
        }
        h1 { margin-bottom: 8px; }
        ul.help { color: #555; margin-top: 0; }
        .controls { width: 60%; margin: 20px 0; }
        .controls label { font-weight: 600; display: block; margin-bottom: 6px; }
        .controls input[type=range] { width: 100%; }
        #status { color: #666; font-size: 14px; margin: 8px 0; }
        #error {
            display: none;
            background: #fde8e8;
            color: #9b1c1c;
            padding: 12px 16px;
            border-radius: 6px;
        }
        .table-wrap {
            overflow-x: auto;
            max-height: 420px;
            background: white;
            border: 1px solid #e6e6e6;
            border-radius: 6px;
        }
        table { border-collapse: collapse; font-size: 14px; white-space: nowrap; }
        th, td { padding: 6px 10px; border-bottom: 1px solid #eee; text-align: right; }
        th { position: sticky; top: 0; background: #f7f7f9; cursor: pointer; }
        td.player, th.player { text-align: left; }
        td.idx { color: #999; }
        .chart { background: white; margin-top: 24px; border-radius: 6px; }
    </style>
</head>
<body>
    <h1>🏏 T20 International Batting Records</h1>
    <ul class="help">
        <li>Use the slider below to select how many players to display.</li>
        <li>Scroll the table horizontally to view all stats (matches, runs, strike rate, 100s, 50s, etc).</li>
        <li>Click on column headers to sort the table.</li>
        <li>The bar chart below shows total runs for the selected players.</li>
    </ul>

    <div class="controls">
        <label for="count">Number of records to display: <span id="countValue">20</span></label>
        <input id="count" type="range" min="10" max="200" step="10" value="20">
    </div>

    <div id="status"></div>
    <div id="error"></div>

    <div id="content">
        <h2>Player Batting Statistics</h2>
        <div class="table-wrap"><table id="records"></table></div>
        <div id="bar" class="chart"></div>
        <div id="scatter" class="chart"></div>
        <div id="sunburst" class="chart"></div>
    </div>

    <script>
        const slider = document.getElementById('count');
        const countValue = document.getElementById('countValue');
        const statusEl = document.getElementById('status');
        const errorEl = document.getElementById('error');
        const contentEl = document.getElementById('content');
        let rows = [];
        let sortState = { col: null, asc: true };
        let latestLoad = 0;

        function cellValue(text) {
            const n = parseFloat(String(text).replace(/,/g, '').replace(/\*$/, ''));
            return Number.isNaN(n) ? String(text) : n;
        }

        function renderTable(table) {
            const el = document.getElementById('records');
            el.innerHTML = '';
            const head = el.createTHead().insertRow();
            const idxTh = document.createElement('th');
            idxTh.textContent = '';
            head.appendChild(idxTh);
            table.columns.forEach((name, col) => {
                const th = document.createElement('th');
                th.textContent = name;
                if (col === 0) th.className = 'player';
                th.onclick = () => sortBy(col, table);
                head.appendChild(th);
            });
            const body = el.createTBody();
            rows.forEach(row => {
                const tr = body.insertRow();
                const idx = tr.insertCell();
                idx.className = 'idx';
                idx.textContent = row.index;
                row.cells.forEach((cell, col) => {
                    const td = tr.insertCell();
                    if (col === 0) td.className = 'player';
                    td.textContent = cell;
                });
            });
        }

        function sortBy(col, table) {
            sortState.asc = sortState.col === col ? !sortState.asc : true;
            sortState.col = col;
            rows.sort((a, b) => {
                const x = cellValue(a.cells[col]);
                const y = cellValue(b.cells[col]);
                const cmp = x < y ? -1 : x > y ? 1 : 0;
                return sortState.asc ? cmp : -cmp;
            });
            renderTable(table);
        }

        function showError(message) {
            contentEl.style.display = 'none';
            errorEl.style.display = 'block';
            errorEl.textContent = message;
        }

        async function load(count) {
            // only the newest slider value may draw
            const seq = ++latestLoad;
            statusEl.textContent = `Fetching ${count} records...`;
            try {
                const resp = await fetch(`/api/dashboard?count=${count}`);
                if (!resp.ok) {
                    const text = await resp.text();
                    if (seq === latestLoad) showError(text);
                    return;
                }
                const view = await resp.json();
                if (seq !== latestLoad) return;
                if (view.status !== 'ready') {
                    showError(view.message);
                    return;
                }
                errorEl.style.display = 'none';
                contentEl.style.display = 'block';
                rows = view.table.rows;
                sortState = { col: null, asc: true };
                renderTable(view.table);
                const cfg = { responsive: true };
                Plotly.newPlot('bar', view.charts.bar.data, view.charts.bar.layout, cfg);
                Plotly.newPlot('scatter', view.charts.scatter.data, view.charts.scatter.layout, cfg);
                Plotly.newPlot('sunburst', view.charts.sunburst.data, view.charts.sunburst.layout, cfg);
            } catch (e) {
                if (seq === latestLoad) showError(`Request error: ${e}`);
            } finally {
                if (seq === latestLoad) statusEl.textContent = '';
            }
        }

        slider.addEventListener('input', () => { countValue.textContent = slider.value; });
        slider.addEventListener('change', () => load(slider.value));
        load(slider.value);
    </script>
</body>
</html>
"##;
