//! Cytoscape graph rendering engine.
//!
//! Generates the parameterized `<script>` block driving the viewer page:
//! graph init with the fCoSE layout options, filter wiring, the detail
//! sidebar and edit form, autocomplete for edge targets, exports, and URL
//! state sync. Everything dynamic arrives through one config object; the
//! engine body itself is a fixed script.

use crate::models::{FilterState, LayoutConfig};

/// How graph data is provided to the page script.
pub enum GraphDataSource {
    /// Payload embedded directly in the page as a JS literal.
    Inline { graph_json: String },
    /// Payload fetched from a URL on startup.
    FetchUrl { url: String },
}

/// Configuration for the graph engine script.
pub struct RendererConfig {
    /// Element id of the graph container (e.g. "cy").
    pub container_id: String,
    /// Layout engine tuning parameters.
    pub layout: LayoutConfig,
    /// Filter checkbox state the page was opened with.
    pub filter: FilterState,
    /// Where the initial graph payload comes from. Refreshes after edits
    /// always go through the graph API.
    pub data_source: GraphDataSource,
}

/// Returns the `<script>` block: a config prelude plus the fixed engine.
pub fn render_graph_js(config: &RendererConfig) -> String {
    let layout_json =
        serde_json::to_string(&config.layout).unwrap_or_else(|_| "{}".to_string());
    let selected_js = match &config.filter.node {
        Some(key) => serde_json::to_string(key).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    };
    let data_js = match &config.data_source {
        GraphDataSource::Inline { graph_json } => format!("const _tgData = {};", graph_json),
        GraphDataSource::FetchUrl { url } => format!(
            "const _tgData = await (await fetch('{}')).json();",
            url
        ),
    };

    format!(
        r#"<script>
(async function() {{
    const TG = {{
        containerId: '{container_id}',
        layout: {layout_json},
        urlNode: {selected_js},
    }};
    {data_js}
{engine}
}})();
</script>"#,
        container_id = config.container_id,
        layout_json = layout_json,
        selected_js = selected_js,
        data_js = data_js,
        engine = ENGINE_JS,
    )
}

// The engine references only `TG` and `_tgData` from the prelude, so the
// body stays free of format placeholders.
const ENGINE_JS: &str = r##"
    let cy;
    let payload = _tgData;           // {elements, categories, category_colors, stats}
    let allNodes = payload.elements.nodes;
    let allEdges = payload.elements.edges;
    let categories = payload.categories;
    let categoryColors = payload.category_colors;
    let isEditMode = false;
    let selectedNode = null;         // {key, data}
    let editingKey = null;           // null while creating a new term

    // Deterministic positions across reloads: the layout engine consumes
    // Math.random, so seed it.
    Math.random = (function() {
        let seed = 12345;
        return function() {
            seed = (seed * 9301 + 49297) % 233280;
            return seed / 233280;
        };
    })();

    // --- Styles ---

    function graphStyle() {
        const style = [
            {
                selector: 'node',
                style: {
                    'shape': 'roundrectangle',
                    'background-color': '#f8f9fa',
                    'label': 'data(label)',
                    'text-valign': 'center',
                    'text-halign': 'center',
                    'color': '#333',
                    'font-size': '11px',
                    'font-weight': 'bold',
                    'text-wrap': 'wrap',
                    'text-max-width': '140px',
                    'width': 'data(width)',
                    'height': 'data(height)',
                    'border-width': 2,
                    'border-color': '#dee2e6',
                    'padding': '8px'
                }
            },
            {
                selector: 'edge',
                style: {
                    'width': 2,
                    'line-color': '#bdc3c7',
                    'target-arrow-color': '#bdc3c7',
                    'target-arrow-shape': 'triangle',
                    'curve-style': 'bezier'
                }
            },
            {
                selector: 'edge[type="synonym"]',
                style: { 'line-color': '#27ae60', 'target-arrow-color': '#27ae60' }
            },
            {
                selector: 'edge[type="related"]',
                style: { 'line-color': '#f39c12', 'target-arrow-color': '#f39c12' }
            },
            {
                selector: 'node:selected',
                style: { 'border-width': 4, 'border-color': '#f1c40f' }
            },
            {
                selector: 'node.node-modified',
                style: { 'border-width': 3, 'border-style': 'dashed', 'border-color': '#f39c12' }
            }
        ];
        for (const [category, colors] of Object.entries(categoryColors)) {
            style.push({
                selector: 'node[category = ' + JSON.stringify(category) + ']',
                style: {
                    'background-color': colors.background,
                    'border-color': colors.border,
                    'color': '#fff'
                }
            });
        }
        return style;
    }

    cy = cytoscape({
        container: document.getElementById(TG.containerId),
        elements: { nodes: allNodes, edges: allEdges },
        style: graphStyle(),
        layout: Object.assign({}, TG.layout, { randomize: true }),
        wheelSensitivity: 0.2
    });

    // --- Tooltip ---

    const tooltip = document.getElementById('tooltip');

    cy.on('mouseover', 'node', (evt) => {
        const node = evt.target;
        const full = node.data('fullData') || {};
        const definition = node.data('definition');
        if (definition || full.synonyms) {
            let html = '<strong>' + escapeHtml(node.data('label')) + '</strong>';
            if (full.synonyms) html += '<br><em>Synonyms: ' + escapeHtml(full.synonyms) + '</em>';
            if (definition) html += '<br>' + escapeHtml(definition);
            tooltip.innerHTML = html;
            tooltip.style.display = 'block';
        }
    });
    cy.on('mouseout', 'node', () => { tooltip.style.display = 'none'; });
    cy.on('mousemove', (evt) => {
        tooltip.style.left = evt.originalEvent.pageX + 10 + 'px';
        tooltip.style.top = evt.originalEvent.pageY + 10 + 'px';
    });

    // --- Selection ---

    cy.on('tap', 'node', async (evt) => {
        const node = evt.target;
        const data = node.data('fullData');
        const key = node.id();
        selectedNode = { key: key, data: data };
        updateURL();

        const event = isEditMode ? { event: 'edit', key: key } : { event: 'select', key: key };
        const resp = await postMode(event);
        applyEffects(resp);
    });

    document.getElementById('close-sidebar').addEventListener('click', async () => {
        document.getElementById('sidebar').classList.remove('active');
        if (isEditMode) applyEffects(await postMode({ event: 'cancel' }));
    });

    // --- Server mode machine ---

    async function postMode(event) {
        const resp = await fetch('/api/mode', {
            method: 'POST',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify(event)
        });
        return resp.json();
    }

    function applyEffects(resp) {
        if (!resp || !resp.effects) return;
        for (const effect of resp.effects) {
            switch (effect.effect) {
                case 'show_details': showSidebar(findRecord(effect.key)); break;
                case 'show_form': showEditForm(effect.key); break;
                case 'close_sidebar':
                    document.getElementById('sidebar').classList.remove('active');
                    break;
                case 'refresh': refreshGraph(false); break;
                case 'relayout': refreshGraph(true); break;
            }
        }
        if ('has_changes' in resp) updateChangesIndicator(resp);
    }

    function findRecord(key) {
        const node = cy.getElementById(key);
        if (node.length > 0) return node.data('fullData');
        const el = allNodes.find(n => n.data.id === key);
        return el ? el.data.fullData : null;
    }

    // --- Sidebar (view mode) ---

    function showSidebar(data) {
        if (!data) return;
        const sidebar = document.getElementById('sidebar');
        const termEl = document.getElementById('sidebar-term');
        const contentEl = document.getElementById('sidebar-content');
        document.getElementById('sidebar-edit-form').classList.add('hidden');
        contentEl.classList.remove('hidden');

        const review = data.fields_to_review || [];
        const flag = (field) =>
            review.includes(field) ? ' <span class="review-flag">&#9888; For Review</span>' : '';

        termEl.innerHTML = escapeHtml(data.term) + flag('term');

        let content = '';
        const section = (title, text, field) => {
            if (!text) return;
            content += '<div class="sidebar-section"><h4>' + title + flag(field) +
                '</h4><p>' + escapeHtml(text) + '</p></div>';
        };
        section('Short Definition', data.definition, 'definition');
        section('Synonyms', data.synonyms, 'synonyms');
        section('Acronyms', data.acronyms, 'acronyms');
        section('Why it matters?', data.explanation, 'explanation');
        section('Technical Summary', data.technical_summary, 'technical_summary');
        section('Category', data.category || 'General', 'category');

        if (data.edges && data.edges.length > 0) {
            content += '<div class="sidebar-section"><h4>Connections</h4><ul class="connections-list">';
            for (const edge of data.edges) {
                const target = cy.getElementById(edge.target);
                const label = target.length > 0 ? target.data('label') : edge.target;
                content += '<li><span class="edge-type ' + escapeHtml(edge.type) + '">' +
                    escapeHtml(edge.type) + '</span> &rarr; ' + escapeHtml(label) + '</li>';
            }
            content += '</ul></div>';
        }

        contentEl.innerHTML = content;
        sidebar.classList.add('active');
    }

    // --- Edit form ---

    function showEditForm(key) {
        const data = key ? findRecord(key) : emptyRecord();
        if (!data) return;
        editingKey = key;

        document.getElementById('sidebar-content').classList.add('hidden');
        const form = document.getElementById('sidebar-edit-form');
        form.classList.remove('hidden');
        document.getElementById('form-error').classList.add('hidden');
        document.getElementById('sidebar-term').textContent = key ? data.term : 'New Term';
        document.getElementById('delete-term').style.display = key ? '' : 'none';

        document.getElementById('edit-term').value = data.term || '';
        document.getElementById('edit-definition').value = data.definition || '';
        document.getElementById('edit-explanation').value = data.explanation || '';
        document.getElementById('edit-synonyms').value = data.synonyms || '';
        document.getElementById('edit-acronyms').value = data.acronyms || '';
        document.getElementById('edit-technical-summary').value = data.technical_summary || '';

        populateCategoryDropdown();
        document.getElementById('edit-category').value = data.category || '';
        document.getElementById('edit-category-custom').classList.add('hidden');

        populateReviewCheckboxes(data.fields_to_review || []);
        populateEdgesList(data.edges || []);

        document.getElementById('sidebar').classList.add('active');
        if (!key) document.getElementById('edit-term').focus();
    }

    function emptyRecord() {
        return { term: '', definition: '', explanation: '', synonyms: '', acronyms: '',
                 technical_summary: '', category: 'General', edges: [], fields_to_review: [] };
    }

    function populateCategoryDropdown() {
        const select = document.getElementById('edit-category');
        select.innerHTML = '<option value="">Select or create...</option>';
        for (const category of categories) {
            const option = document.createElement('option');
            option.value = category;
            option.textContent = category;
            select.appendChild(option);
        }
        const custom = document.createElement('option');
        custom.value = '__new__';
        custom.textContent = '+ Create New Category';
        select.appendChild(custom);
    }

    document.getElementById('edit-category').addEventListener('change', (e) => {
        const custom = document.getElementById('edit-category-custom');
        if (e.target.value === '__new__') {
            custom.classList.remove('hidden');
            custom.focus();
        } else {
            custom.classList.add('hidden');
        }
    });

    function populateReviewCheckboxes(fieldsToReview) {
        for (const checkbox of document.querySelectorAll('.review-checkbox')) {
            const field = checkbox.dataset.field;
            checkbox.checked = fieldsToReview.includes(field);
            markFieldForReview(field, checkbox.checked);
        }
    }

    function markFieldForReview(field, marked) {
        const el = document.getElementById('edit-' + field.replace('_', '-'));
        if (el) el.classList.toggle('field-marked-for-review', marked);
    }

    for (const checkbox of document.querySelectorAll('.review-checkbox')) {
        checkbox.addEventListener('change', (e) => {
            markFieldForReview(e.target.dataset.field, e.target.checked);
        });
    }

    // --- Edge rows ---

    function populateEdgesList(edges) {
        const list = document.getElementById('edges-list');
        list.innerHTML = '';
        for (const edge of edges) {
            const target = cy.getElementById(edge.target);
            const label = target.length > 0 ? target.data('label') : edge.target;
            addEdgeItem(edge.type, label, edge.target);
        }
        if (edges.length === 0) {
            list.innerHTML = '<p style="color: #6c757d; font-style: italic;">No connections defined</p>';
        }
    }

    function addEdgeItem(type = 'related', targetLabel = '', targetKey = '') {
        const list = document.getElementById('edges-list');
        if (list.querySelector('p')) list.innerHTML = '';

        const isKnownType = type === 'synonym' || type === 'related';
        const item = document.createElement('div');
        item.className = 'edge-item';
        item.innerHTML =
            '<select>' +
                '<option value="synonym">Synonym</option>' +
                '<option value="related">Related</option>' +
                '<option value="__custom__">Custom</option>' +
            '</select>' +
            '<input type="text" class="custom-type hidden" placeholder="Type">' +
            '<div class="autocomplete-container">' +
                '<input type="text" class="edge-target" placeholder="Type to search terms..." autocomplete="off">' +
                '<div class="autocomplete-dropdown hidden"></div>' +
            '</div>' +
            '<button type="button" class="remove-edge" title="Remove">&times;</button>';

        const typeSelect = item.querySelector('select');
        const customInput = item.querySelector('.custom-type');
        typeSelect.value = isKnownType ? type : '__custom__';
        if (!isKnownType) {
            customInput.value = type;
            customInput.classList.remove('hidden');
        }
        typeSelect.addEventListener('change', () => {
            customInput.classList.toggle('hidden', typeSelect.value !== '__custom__');
            if (typeSelect.value === '__custom__') customInput.focus();
        });

        const targetInput = item.querySelector('.edge-target');
        targetInput.value = targetLabel;
        if (targetKey) targetInput.dataset.selectedId = targetKey;
        setupAutocomplete(targetInput);

        item.querySelector('.remove-edge').addEventListener('click', () => {
            item.remove();
            if (list.children.length === 0) {
                list.innerHTML = '<p style="color: #6c757d; font-style: italic;">No connections defined</p>';
            }
        });

        list.appendChild(item);
    }

    document.getElementById('add-edge').addEventListener('click', () => addEdgeItem());

    // --- Autocomplete ---

    function setupAutocomplete(input) {
        const container = input.parentElement;
        const dropdown = container.querySelector('.autocomplete-dropdown');
        let currentFocus = -1;

        async function showMatches(query) {
            if (!query) { dropdown.classList.add('hidden'); return; }
            const matches = await (await fetch('/api/terms?q=' + encodeURIComponent(query))).json();
            if (matches.length === 0) { dropdown.classList.add('hidden'); return; }

            dropdown.innerHTML = '';
            matches.forEach((match) => {
                const item = document.createElement('div');
                item.className = 'autocomplete-item';
                item.innerHTML = '<span class="term-name">' + escapeHtml(match.term) + '</span>' +
                    '<span class="term-category">' + escapeHtml(match.category) + '</span>';
                item.dataset.termKey = match.key;
                item.dataset.termName = match.term;
                item.addEventListener('click', () => selectTerm(match.term, match.key));
                dropdown.appendChild(item);
            });
            dropdown.classList.remove('hidden');
            currentFocus = -1;
        }

        function selectTerm(name, key) {
            input.value = name;
            input.dataset.selectedId = key;
            dropdown.classList.add('hidden');
            currentFocus = -1;
        }

        input.addEventListener('input', (e) => {
            delete input.dataset.selectedId;
            showMatches(e.target.value.trim());
        });
        input.addEventListener('focus', (e) => {
            if (e.target.value.trim()) showMatches(e.target.value.trim());
        });
        input.addEventListener('keydown', (e) => {
            const items = dropdown.querySelectorAll('.autocomplete-item');
            if (e.key === 'ArrowDown') {
                e.preventDefault();
                currentFocus = Math.min(currentFocus + 1, items.length - 1);
                updateActive(items);
            } else if (e.key === 'ArrowUp') {
                e.preventDefault();
                currentFocus = Math.max(currentFocus - 1, -1);
                updateActive(items);
            } else if (e.key === 'Enter') {
                e.preventDefault();
                if (currentFocus >= 0 && items[currentFocus]) {
                    const item = items[currentFocus];
                    selectTerm(item.dataset.termName, item.dataset.termKey);
                }
            } else if (e.key === 'Escape') {
                dropdown.classList.add('hidden');
                currentFocus = -1;
            }
        });

        function updateActive(items) {
            items.forEach((item, index) => {
                item.classList.toggle('active', index === currentFocus);
            });
        }

        document.addEventListener('click', (e) => {
            if (!container.contains(e.target)) {
                dropdown.classList.add('hidden');
                currentFocus = -1;
            }
        });
    }

    // --- Save / delete / cancel ---

    function collectForm() {
        let category = document.getElementById('edit-category').value;
        if (category === '__new__') {
            category = document.getElementById('edit-category-custom').value.trim();
        }

        const edges = [];
        for (const item of document.querySelectorAll('.edge-item')) {
            let type = item.querySelector('select').value;
            if (type === '__custom__') {
                type = item.querySelector('.custom-type').value.trim();
                if (!type) continue;
            }
            const targetInput = item.querySelector('.edge-target');
            let target = targetInput.dataset.selectedId;
            if (!target && targetInput.value.trim()) {
                // Fall back to an exact label match; unknown names are
                // dropped rather than creating terms implicitly.
                const byLabel = allNodes.find(n => n.data.label === targetInput.value.trim());
                if (byLabel) target = byLabel.data.id;
            }
            if (target) edges.push({ type: type, target: target });
        }

        const fieldsToReview = [];
        for (const checkbox of document.querySelectorAll('.review-checkbox:checked')) {
            fieldsToReview.push(checkbox.dataset.field);
        }

        return {
            term: document.getElementById('edit-term').value.trim(),
            definition: document.getElementById('edit-definition').value,
            explanation: document.getElementById('edit-explanation').value,
            synonyms: document.getElementById('edit-synonyms').value,
            acronyms: document.getElementById('edit-acronyms').value,
            technical_summary: document.getElementById('edit-technical-summary').value,
            category: category,
            edges: edges,
            fields_to_review: fieldsToReview
        };
    }

    document.getElementById('save-term').addEventListener('click', async () => {
        const update = collectForm();
        const url = editingKey
            ? '/api/term/' + encodeURIComponent(editingKey)
            : '/api/term';
        const resp = await fetch(url, {
            method: 'POST',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify(update)
        });
        if (!resp.ok) {
            showFormError(await resp.text());
            return;
        }
        const body = await resp.json();
        if (body.key) {
            editingKey = body.key;
            selectedNode = { key: body.key, data: null };
            updateURL();
        }
        applyEffects(body);
    });

    document.getElementById('delete-term').addEventListener('click', async () => {
        if (!editingKey) return;
        const data = findRecord(editingKey);
        const name = data ? data.term : editingKey;
        if (!confirm('Are you sure you want to delete "' + name + '"? This action cannot be undone.')) {
            return;
        }
        const resp = await fetch('/api/term/' + encodeURIComponent(editingKey), { method: 'DELETE' });
        if (!resp.ok) {
            showFormError(await resp.text());
            return;
        }
        selectedNode = null;
        editingKey = null;
        updateURL();
        applyEffects(await resp.json());
    });

    document.getElementById('cancel-edit').addEventListener('click', async () => {
        applyEffects(await postMode({ event: 'cancel' }));
        if (selectedNode) showSidebar(findRecord(selectedNode.key));
    });

    function showFormError(message) {
        const el = document.getElementById('form-error');
        el.textContent = message;
        el.classList.remove('hidden');
    }

    // --- Mode toggle ---

    const editToggle = document.getElementById('edit-toggle');
    editToggle.addEventListener('click', async () => {
        isEditMode = !isEditMode;
        editToggle.textContent = isEditMode ? 'Switch to View Mode' : 'Switch to Edit Mode';
        editToggle.classList.toggle('active', isEditMode);
        document.getElementById('mode-indicator').textContent = isEditMode ? 'Edit Mode' : 'View Mode';
        document.getElementById('add-new-term').classList.toggle('hidden', !isEditMode);

        if (isEditMode && selectedNode) {
            applyEffects(await postMode({ event: 'edit', key: selectedNode.key }));
        } else if (!isEditMode) {
            applyEffects(await postMode({ event: 'cancel' }));
            if (selectedNode) showSidebar(findRecord(selectedNode.key));
        }
    });

    document.getElementById('add-new-term').addEventListener('click', () => {
        showEditForm(null);
    });

    // --- Filters ---

    const filterAllEdges = document.getElementById('filter-all-edges');
    const edgeFilters = ['synonym', 'related', 'other']
        .map(kind => document.getElementById('filter-' + kind));
    const filterAllCategories = document.getElementById('filter-all-categories');

    filterAllEdges.addEventListener('change', () => {
        if (filterAllEdges.checked) edgeFilters.forEach(f => { f.checked = true; });
        applyFilters();
        updateURL();
    });
    edgeFilters.forEach(filter => {
        filter.addEventListener('change', () => {
            filterAllEdges.checked = edgeFilters.every(f => f.checked);
            applyFilters();
            updateURL();
        });
    });

    filterAllCategories.addEventListener('change', () => {
        for (const checkbox of document.querySelectorAll('[data-category]')) {
            checkbox.checked = filterAllCategories.checked;
        }
        applyFilters();
        updateURL();
    });
    function wireCategoryBoxes() {
        for (const checkbox of document.querySelectorAll('[data-category]')) {
            checkbox.onchange = () => {
                const boxes = Array.from(document.querySelectorAll('[data-category]'));
                filterAllCategories.checked = boxes.every(cb => cb.checked);
                applyFilters();
                updateURL();
            };
        }
    }
    wireCategoryBoxes();

    function edgeTypeVisible(type) {
        if (type === 'synonym') return edgeFilters[0].checked;
        if (type === 'related') return edgeFilters[1].checked;
        return edgeFilters[2].checked;
    }

    function applyFilters() {
        const activeCategories = new Set();
        for (const checkbox of document.querySelectorAll('[data-category]:checked')) {
            activeCategories.add(checkbox.dataset.category);
        }

        const visibleNodes = allNodes.filter(n => activeCategories.has(n.data.category));
        const visibleIds = new Set(visibleNodes.map(n => n.data.id));
        const visibleEdges = allEdges.filter(e =>
            edgeTypeVisible(e.data.type) &&
            visibleIds.has(e.data.source) &&
            visibleIds.has(e.data.target));

        cy.remove('*');
        cy.add([...visibleNodes, ...visibleEdges]);
        cy.layout(TG.layout).run();
    }

    // --- Graph refresh after edits ---

    async function refreshGraph(relayout) {
        payload = await (await fetch('/api/graph')).json();
        allNodes = payload.elements.nodes;
        allEdges = payload.elements.edges;

        // New categories need checkboxes and colors.
        if (payload.categories.length !== categories.length) {
            categories = payload.categories;
            categoryColors = payload.category_colors;
            const container = document.getElementById('category-filters');
            container.innerHTML = '';
            for (const category of categories) {
                const label = document.createElement('label');
                const checkbox = document.createElement('input');
                checkbox.type = 'checkbox';
                checkbox.checked = true;
                checkbox.dataset.category = category;
                label.appendChild(checkbox);
                label.appendChild(document.createTextNode(category));
                container.appendChild(label);
            }
            wireCategoryBoxes();
            cy.style(graphStyle());
        } else {
            categories = payload.categories;
            categoryColors = payload.category_colors;
        }

        const positions = {};
        if (!relayout) {
            cy.nodes().forEach(node => { positions[node.id()] = node.position(); });
        }

        applyFilters();

        if (relayout) {
            cy.layout(Object.assign({}, TG.layout, { animate: true })).run();
        } else {
            cy.nodes().forEach(node => {
                if (positions[node.id()]) node.position(positions[node.id()]);
            });
        }

        if (selectedNode) {
            const node = cy.getElementById(selectedNode.key);
            if (node.length > 0) node.addClass('node-modified');
        }
    }

    function updateChangesIndicator(resp) {
        document.getElementById('changes-indicator')
            .classList.toggle('hidden', !resp.has_changes);
    }

    // --- Exports ---

    document.getElementById('copy-json').addEventListener('click', async () => {
        const json = await (await fetch('/api/dataset')).text();
        try {
            await navigator.clipboard.writeText(json);
        } catch (err) {
            console.error('Failed to copy to clipboard:', err);
            // Fallback: transient off-screen text area + execCommand.
            const textArea = document.createElement('textarea');
            textArea.value = json;
            textArea.style.position = 'fixed';
            textArea.style.left = '-9999px';
            document.body.appendChild(textArea);
            textArea.select();
            document.execCommand('copy');
            document.body.removeChild(textArea);
        }
        const feedback = document.getElementById('copy-feedback');
        feedback.classList.remove('hidden');
        setTimeout(() => feedback.classList.add('hidden'), 1000);
    });

    document.getElementById('download-json').addEventListener('click', () => {
        window.location.href = '/export/json';
    });

    document.getElementById('download-patch').addEventListener('click', async () => {
        const resp = await fetch('/export/patch');
        const notice = document.getElementById('export-notice');
        if (resp.status === 409) {
            notice.textContent = await resp.text();
            notice.classList.remove('hidden');
            setTimeout(() => notice.classList.add('hidden'), 2500);
            return;
        }
        const disposition = resp.headers.get('content-disposition') || '';
        const match = disposition.match(/filename="([^"]+)"/);
        const filename = match ? match[1] : 'knowledge-graph-changes.patch';
        const blob = await resp.blob();
        const link = document.createElement('a');
        link.href = URL.createObjectURL(blob);
        link.download = filename;
        link.click();
        URL.revokeObjectURL(link.href);
    });

    // --- URL state ---

    function updateURL() {
        const params = new URLSearchParams();

        const enabledKinds = ['synonym', 'related', 'other'].filter((kind, i) => edgeFilters[i].checked);
        if (enabledKinds.length > 0 && enabledKinds.length < 3) {
            params.set('edges', enabledKinds.join(','));
        }

        const enabledCategories = [];
        for (const checkbox of document.querySelectorAll('[data-category]:checked')) {
            enabledCategories.push(checkbox.dataset.category);
        }
        if (enabledCategories.length > 0 && enabledCategories.length < categories.length) {
            params.set('categories', enabledCategories.join(','));
        }

        if (selectedNode) params.set('node', selectedNode.key);

        const query = params.toString();
        window.history.replaceState({}, '', query ? window.location.pathname + '?' + query : window.location.pathname);
    }

    // --- Startup ---

    // Checkbox state arrives pre-applied from the server; enforce it on the
    // rendered elements, then reapply the URL-selected node once the
    // initial draw has had a moment to settle.
    applyFilters();
    fetch('/api/changes').then(r => r.json()).then(updateChangesIndicator);

    if (TG.urlNode) {
        setTimeout(async () => {
            const node = cy.getElementById(TG.urlNode);
            if (node.length > 0) {
                selectedNode = { key: TG.urlNode, data: node.data('fullData') };
                cy.nodes().unselect();
                node.select();
                applyEffects(await postMode({ event: 'select', key: TG.urlNode }));
            }
        }, 100);
    }

    function escapeHtml(text) {
        const div = document.createElement('div');
        div.textContent = text == null ? '' : String(text);
        return div.innerHTML;
    }
"##;
