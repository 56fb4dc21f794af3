//! Built-in descriptor documents.

/// Valid sample served by default: a registry with a DNS and a database dependency.
pub const SAMPLE_DOCUMENT: &str = r#"{
    "version": "v1alpha1",
    "name": "Nexus OSS (OCI Registry)",
    "endpoint": "https://nexus.example.com/",
    "infoEndpoint": "https://cooldudes.example.com/serviceInfo/nexus",
    "dependencies": [
        {
            "kind": "eventualMax",
            "eventualMax": 300,
            "endpoint": "https://ns1.example.com/",
            "infoEndpoint": "https://cooldudes.example.com/serviceInfo/dns",
            "slos": [
                { "kind": "Availability", "interval": "month", "targetValue": 96 },
                { "kind": "MTTR", "interval": "month", "targetValue": 100 },
                { "kind": "Latency", "interval": "month", "targetValue": 100 }
            ]
        },
        {
            "kind": "permanent",
            "endpoint": "https://mysqldb.example.com/",
            "infoEndpoint": "https://axis-of-evil.example.com/services/mysql",
            "slos": [
                { "kind": "Availability", "interval": "month", "targetValue": 96 },
                { "kind": "MTTR", "interval": "month", "targetValue": 100 },
                { "kind": "Latency", "interval": "month", "targetValue": 100 }
            ]
        }
    ],
    "consumers": []
}
"#;

/// The document the first fixture server shipped with, byte for byte. It is not
/// valid JSON (an unescaped quote inside `name`, a block comment in `consumers`
/// and a stray closing brace) and must always fail to parse.
pub const LEGACY_DOCUMENT: &str = r#"
{
    "version": "v1alpha1",
    "name": "  "Nexus OSS (OCI Registry)",
    "endpoint": "https://nexus.example.com/",
    "infoEndpoint": "https://cooldudes.example.com/serviceInfo/nexus",
    "dependencies": [ 
        {
            "kind": "eventualMax",
            "eventualMax": 300,
            "endpoint": "https://ns1.example.com/",
            "infoEndpoint": "https://cooldudes.example.com/serviceInfo/dns",
            "slos": [
                {
					"kind": "Availability",
					"interval": "month",
					"targetValue": 96
				},
                {
					"kind": "MTTR",
					"interval": "month",
					"targetValue": 100
                },
                {
					"kind": "Latency",
					"interval": "month",
					"targetValue": 100
                }
            ]
        } ,
        {
            "kind": "permanent",
            "endpoint": "https://mysqldb.example.com/",
            "infoEndpoint": "https://axis-of-evil.example.com/services/mysql",
            "slos": [
                {
					"kind": "Availability",
					"interval": "month",
					"targetValue": 96
                },
                {
					"kind": "MTTR",
					"interval": "month",
					"targetValue": 100
                },
                {
					"kind": "Latency",
					"interval": "month",
					"targetValue": 100
                }
            ]
        } 
    ],
    "consumers": [ 
		/*
        {
            type: <permanent |  eventual | eventualMax | eventualStart | startup; required>
            eventualMax: <time in second until eventualMax has to be refreshed. a value of 0 makes it equal to   
                          permanent; optional>
            endpoint: <URL; required>
            infoEndpoint: <URL, where service info data, for use by sloview, can be read from; optional>
        } 
		*/
    ]
}
}
"#;
